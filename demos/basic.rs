use fieldgate::{ConditionSet, ConditionalGroup, FieldDef, FieldKind, Record};

fn main() {
    let conditions = ConditionSet::new()
        .when("age > 18")
        .or_when("country == 'US' AND consent boolean true");

    println!("{conditions}");

    let record = Record::new()
        .set("age", 16_i64)
        .set("country", "US")
        .set("consent", true);

    match conditions.matches(&record) {
        Ok(matched) => println!("matched: {matched}"),
        Err(err) => eprintln!("{err}"),
    }

    let shipping = ConditionalGroup::new(vec![
        FieldDef::new("address").default_value(""),
        FieldDef::new("carrier").kind(FieldKind::Relational),
    ])
    .when("delivery === 'ship'");

    let pickup = Record::new()
        .set("delivery", "pickup")
        .set("address", "1 Main St");

    match shipping.stale_resets(&pickup) {
        Ok(resets) => {
            for reset in resets {
                println!("reset {} to {}", reset.attribute, reset.value);
            }
        }
        Err(err) => eprintln!("{err}"),
    }
}
