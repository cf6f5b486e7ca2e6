//! Graphviz rendering of the link graph.
//!
//! Every node is drawn small and light blue with no label. Highlighted pages
//! are filled red and labelled with their human readable title.

use crate::graph::LinkGraph;
use linkrank_scanner::PageId;
use petgraph::dot::{Config, Dot};
use std::collections::HashSet;

pub const GRAPH_TITLE: &str = "Wikipedia Article Link Network";

/// DOT source for `graph`, with `highlighted` pages emphasised.
pub fn render_dot(graph: &LinkGraph, highlighted: &[PageId], path_prefix: &str) -> String {
    let highlighted: HashSet<&PageId> = highlighted.iter().collect();

    let node_attrs = |_, (_, page): (_, &PageId)| {
        if highlighted.contains(page) {
            format!(
                "shape = circle, style = filled, fillcolor = red, fontcolor = red, \
                 fontsize = 8, xlabel = \"{}\", label = \"\"",
                escape_label(&page.label(path_prefix))
            )
        } else {
            "shape = point, style = filled, fillcolor = lightblue, color = lightblue, \
             label = \"\""
                .to_string()
        }
    };
    let body = Dot::with_attr_getters(
        graph.inner(),
        &[
            Config::EdgeNoLabel,
            Config::NodeNoLabel,
            Config::GraphContentOnly,
        ],
        &|_, _| "color = gray".to_string(),
        &node_attrs,
    );

    let mut dot = String::new();
    dot.push_str("digraph {\n");
    dot.push_str(&format!("    label = \"{}\"\n", escape_label(GRAPH_TITLE)));
    dot.push_str("    labelloc = t\n");
    dot.push_str(&format!("{:?}", body));
    dot.push_str("}\n");
    dot
}

fn escape_label(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
