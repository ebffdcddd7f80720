use docket::{parse, Section};

fn main() {
    let corpus = vec![
        Section::new()
            .set("heading", "Permitted Liens")
            .set("article", "Negative Covenants")
            .set("doc_type", "credit_agreement")
            .set("facility_size_mm", 250_i64),
        Section::new()
            .set("heading", "Indebtedness")
            .set("article", "Negative Covenants")
            .set("doc_type", "credit_agreement")
            .set("facility_size_mm", 500_i64),
        Section::new()
            .set("heading", "Financial Covenants")
            .set("doc_type", "term_sheet")
            .set("facility_size_mm", 100_i64),
    ];

    let input = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "heading: (liens OR indebtedness) doc_type: credit".to_owned());

    match parse(&input) {
        Ok(query) => {
            println!("query: {query}");
            for section in query.filter(&corpus) {
                println!("  {:?}", section.get("heading"));
            }
        }
        Err(err) => {
            eprintln!("{input}");
            eprintln!("{:>width$} {err}", "^", width = err.offset() + 1);
        }
    }
}
