use adaptplan_plan::weekly_plan_json_schema;

fn main() {
    let schema = weekly_plan_json_schema();
    let json = serde_json::to_string_pretty(&schema).expect("serialize weekly plan json schema");
    println!("{json}");
}
