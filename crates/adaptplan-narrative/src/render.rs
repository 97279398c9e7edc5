use std::fmt::{self, Write};

use crate::model::{PlanPackage, WEEKDAYS};

/// Render a plan package as Markdown for parents.
///
/// Days are always listed Mon through Fri; a day missing from the narrative
/// is rendered with no activities.
pub fn render_markdown(package: &PlanPackage) -> Result<String, fmt::Error> {
    let plan = &package.plan;
    let narrative = &package.narrative;
    let mut out = String::new();

    writeln!(
        out,
        "# Weekly plan for {} (week of {})\n",
        plan.child().name(),
        plan.week_of()
    )?;

    writeln!(out, "## Weekly Overview\n")?;
    writeln!(out, "{}\n", narrative.overview)?;

    writeln!(out, "## Daily Schedule\n")?;
    for day in WEEKDAYS {
        writeln!(out, "### {day}\n")?;
        write_list(&mut out, narrative.day(day))?;
        writeln!(out)?;
    }

    writeln!(out, "## Parent Tips\n")?;
    write_list(&mut out, &narrative.parent_tips)?;
    writeln!(out)?;

    writeln!(out, "## Cautions\n")?;
    write_list(&mut out, &narrative.cautions)?;

    if !plan.safety_flags().is_empty() {
        writeln!(out, "\n## Safety Flags\n")?;
        write_list(&mut out, plan.safety_flags())?;
    }

    Ok(out)
}

fn write_list(out: &mut String, items: &[String]) -> fmt::Result {
    for item in items {
        writeln!(out, "- {item}")?;
    }
    Ok(())
}
