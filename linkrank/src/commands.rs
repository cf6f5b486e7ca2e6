use clap::{Command, arg, command};

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> Command {
    Command::new("linkrank")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("linkrank")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .arg(
            arg!(-v --"verbose" "Enable debug logging (overrides RUST_LOG)")
                .required(false)
                .global(true),
        )
        .subcommand_required(false)
        .subcommand(crawl_arguments(
            command!("crawl").about(
                "Breadth-first crawl from a seed page and print the discovered link lists.",
            ),
        ))
        .subcommand(
            crawl_arguments(command!("rank").about(
                "Crawl from a seed page, build the link graph and rank its pages with PageRank.",
            ))
            .arg(
                arg!(-k --"top" <K>)
                    .required(false)
                    .help("Number of top-ranked pages to report")
                    .value_parser(clap::value_parser!(usize))
                    .default_value("3"),
            )
            .arg(
                arg!(-d --"damping" <FACTOR>)
                    .required(false)
                    .help("Damping factor, between 0 and 1")
                    .value_parser(clap::value_parser!(f64))
                    .default_value("0.85"),
            )
            .arg(
                arg!(--"tolerance" <DELTA>)
                    .required(false)
                    .help("Stop iterating once no score changes by more than this")
                    .value_parser(clap::value_parser!(f64))
                    .default_value("1e-6"),
            )
            .arg(
                arg!(--"max-iterations" <NUM>)
                    .required(false)
                    .help("Iteration cap; scores at the cap are reported as-is")
                    .value_parser(clap::value_parser!(usize))
                    .default_value("100"),
            )
            .arg(
                arg!(-o --"output" <PATH>)
                    .required(false)
                    .help("Save report to file (default: display to screen)")
                    .value_parser(clap::value_parser!(std::path::PathBuf)),
            )
            .arg(
                arg!(-f --"format" <FORMAT>)
                    .required(false)
                    .help("Report format: text, json")
                    .value_parser(["text", "json"])
                    .default_value("text"),
            ),
        )
}

fn crawl_arguments(cmd: Command) -> Command {
    cmd.arg(
        arg!(-s --"seed" <PAGE>)
            .required(false)
            .help(
                "Seed page: a path (/wiki/Graph_theory), an article title, or a full URL \
                 (which also sets the origin)",
            )
            .default_value("/wiki/Data_science"),
    )
    .arg(
        arg!(--"origin" <URL>)
            .required(false)
            .help("Scheme and host that page paths are resolved against")
            .default_value("https://en.wikipedia.org"),
    )
    .arg(
        arg!(--"prefix" <PATH>)
            .required(false)
            .help("Only links whose path starts with this prefix are followed")
            .default_value("/wiki/"),
    )
    .arg(
        arg!(-n --"pages" <NUM>)
            .required(false)
            .help("Page budget: stop after visiting this many pages")
            .value_parser(clap::value_parser!(usize))
            .default_value("5"),
    )
    .arg(
        arg!(-l --"links" <NUM>)
            .required(false)
            .help("Maximum number of links accepted per page")
            .value_parser(clap::value_parser!(usize))
            .default_value("20"),
    )
    .arg(
        arg!(-t --"timeout" <SECONDS>)
            .required(false)
            .help("HTTP request timeout")
            .value_parser(clap::value_parser!(u64))
            .default_value("10"),
    )
    .arg(
        arg!(--"dot" <PATH>)
            .required(false)
            .help("Write the link graph as Graphviz DOT to this file")
            .value_parser(clap::value_parser!(std::path::PathBuf)),
    )
}
