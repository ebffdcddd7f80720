use docket::{parse, Section, Value};

fn main() {
    let query = parse("heading: lien article: /covenants?/").expect("static query parses");
    let section = Section::new()
        .set("heading", "Permitted Liens and Lien Priority")
        .set("article", "Negative Covenants");

    let report = query.matches_detailed(&section);
    println!("matched: {}", report.matched());
    for highlight in report.highlights() {
        let text = match section.get(&highlight.field) {
            Some(Value::Text(text)) => text,
            _ => continue,
        };
        println!(
            "  {}[{}..{}]: {}",
            highlight.field,
            highlight.range.start,
            highlight.range.end,
            &text[highlight.range.clone()],
        );
    }
}
