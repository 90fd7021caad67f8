use std::path::Path;

fn main() {
    let rules_path = Path::new("catalogs/accession_rules.json");
    validate_rules_file(rules_path);
    set_build_dependencies();
}

fn validate_rules_file(rules_path: &Path) {
    // Ensure the rules document exists at build time
    assert!(
        rules_path.exists(),
        "\n\nRULES BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the rules document before building.\n",
        rules_path.display()
    );

    let contents = std::fs::read_to_string(rules_path).unwrap_or_else(|e| {
        panic!(
            "\n\nRULES BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            rules_path.display()
        );
    });

    let rules: serde_json::Value = serde_json::from_str(&contents).unwrap_or_else(|e| {
        panic!(
            "\n\nRULES BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            rules_path.display()
        );
    });

    validate_rules_structure(&rules);
}

fn validate_rules_structure(rules: &serde_json::Value) {
    let rows = rules.as_array().unwrap_or_else(|| {
        panic!(
            "\n\nRULES BUILD ERROR: Root must be a JSON array of rows\n\
             Got: {rules}\n"
        );
    });

    let total_prefixes: usize = rows
        .iter()
        .enumerate()
        .map(|(i, row)| validate_row(row, i))
        .sum();

    println!(
        "cargo:warning=Validated rules: {} rows, {total_prefixes} prefixes",
        rows.len()
    );
}

fn validate_row(row: &serde_json::Value, index: usize) -> usize {
    let fields = row.as_array().unwrap_or_else(|| {
        panic!("\n\nRULES BUILD ERROR: Row {index} is not an array\nGot: {row}\n");
    });

    assert!(
        fields.len() == 4,
        "\n\nRULES BUILD ERROR: Row {index} has {} fields, expected 4\n\
         Rows are [prefixes, database, molecule_type, description].\n",
        fields.len()
    );

    let prefixes = fields[0].as_array().unwrap_or_else(|| {
        panic!("\n\nRULES BUILD ERROR: Row {index} prefixes must be an array\n");
    });

    assert!(
        !prefixes.is_empty(),
        "\n\nRULES BUILD ERROR: Row {index} has no prefixes\n"
    );

    for prefix in prefixes {
        let prefix = prefix.as_str().unwrap_or_else(|| {
            panic!("\n\nRULES BUILD ERROR: Row {index} has a non-string prefix: {prefix}\n");
        });
        assert!(
            !prefix.is_empty(),
            "\n\nRULES BUILD ERROR: Row {index} has an empty prefix\n"
        );
    }

    for (name, field) in ["database", "molecule_type", "description"]
        .iter()
        .zip(&fields[1..])
    {
        assert!(
            field.is_string(),
            "\n\nRULES BUILD ERROR: Row {index} field '{name}' must be a string\n"
        );
    }

    prefixes.len()
}

fn set_build_dependencies() {
    // Tell cargo to rerun if the rules change
    println!("cargo:rerun-if-changed=catalogs/accession_rules.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
