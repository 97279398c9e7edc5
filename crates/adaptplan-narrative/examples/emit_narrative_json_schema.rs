use adaptplan_narrative::narrative_json_schema;

fn main() {
    let schema = narrative_json_schema();
    let json = serde_json::to_string_pretty(&schema).expect("serialize narrative json schema");
    println!("{json}");
}
