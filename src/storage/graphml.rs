//! GraphML export of the filtered protein graph

use crate::graph::CompressedGraph;
use std::io::{self, Write};

/// Write an undirected graph as GraphML. Nodes are identified by their
/// string ids; no attributes are emitted.
pub fn write_graphml<W: Write>(graph: &CompressedGraph, out: &mut W) -> io::Result<()> {
    writeln!(out, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
    writeln!(
        out,
        "<graphml xmlns=\"http://graphml.graphdrawing.org/xmlns\" \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
         xsi:schemaLocation=\"http://graphml.graphdrawing.org/xmlns \
         http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd\">"
    )?;
    writeln!(out, "  <graph edgedefault=\"undirected\">")?;

    for id in &graph.node_ids {
        writeln!(out, "    <node id=\"{}\"/>", escape_xml(id))?;
    }

    for (src, dst) in graph.undirected_edges() {
        writeln!(
            out,
            "    <edge source=\"{}\" target=\"{}\"/>",
            escape_xml(graph.node_id(src as usize)),
            escape_xml(graph.node_id(dst as usize))
        )?;
    }

    writeln!(out, "  </graph>")?;
    writeln!(out, "</graphml>")?;

    Ok(())
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
