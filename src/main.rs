use std::fs;

use clap::{clap_app, crate_description, crate_version};
use log::{debug, LevelFilter};

use asn1_sema::{dependency_sort, topological_sort, AnnotatedToken, ModelBuilder};

fn main() {
    let matches = clap_app!(asn1_sema =>
        (version: crate_version!())
        (about: crate_description!())
        (@arg input: +required "JSON file holding an array of top-level ModuleDefinition tokens.")
        (@arg order: -o --order
            "Print the dependency order of each module's assignments instead of its rendering.")
        (@arg verbose: -v --verbose ...
            "Set log output level")
    )
    .get_matches();

    let mut builder = ::env_logger::Builder::new();

    let filter_level = match matches.occurrences_of("verbose") {
        1 => LevelFilter::Debug,
        2 => LevelFilter::Trace,
        _ => LevelFilter::Warn,
    };

    builder.filter(None, filter_level);
    builder.init();

    debug!("LOG level: {:?}", filter_level);
    debug!("CLI config: {:#?}", matches);

    let path = matches.value_of("input").expect("input is required");
    let source = fs::read_to_string(path).unwrap_or_else(|e| panic!("reading {}: {}", path, e));
    let tokens: Vec<AnnotatedToken> =
        serde_json::from_str(&source).unwrap_or_else(|e| panic!("parsing {}: {}", path, e));

    let modules = ModelBuilder::new(tokens)
        .build()
        .unwrap_or_else(|e| panic!("{}", e));

    if matches.is_present("order") {
        for module in &modules {
            println!("-- {}", module.name);
            match topological_sort(&module.assignments) {
                Ok(ordered) => {
                    for assignment in ordered {
                        if let Some(name) = assignment.reference_name() {
                            println!("{}", name);
                        }
                    }
                }
                Err(_) => {
                    debug!("module {} has cyclic references, falling back to dependency_sort", module.name);
                    for component in dependency_sort(&module.assignments) {
                        let names: Vec<&str> = component.iter().filter_map(|a| a.reference_name()).collect();
                        println!("{}", names.join(" <-> "));
                    }
                }
            }
        }
    } else {
        for module in &modules {
            println!("{}", module);
        }
    }
}
