//! Reading and writing signed graphs in the `.g` text format.
//!
//! ```text
//! <vertex_count> <edge_count>
//! <u> <v> <sign>        (signed format, sign is "1" or "-1")
//! <u> <v>               (unsigned format, implicit sign +1)
//! ```
//!
//! Vertex ids are zero-based unless [`GraphReader::with_one_based`] is set.
//! Edges whose sign token is neither `1` nor `-1` are skipped, as are
//! self-loops. Any other malformed line is a [`Error::Parse`].

use crate::error::{Error, Result};
use crate::graph::{NodeId, Sign, SignedGraph};
use core::str::FromStr;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Edge-line layout of a graph file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphFormat {
    /// `<u> <v> <sign>`.
    #[default]
    Signed,
    /// `<u> <v>`, every edge positive.
    Unsigned,
}

impl FromStr for GraphFormat {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self> {
        match tag {
            "signed" => Ok(GraphFormat::Signed),
            "unsigned" => Ok(GraphFormat::Unsigned),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Configurable graph file reader.
#[derive(Debug, Clone, Default)]
pub struct GraphReader {
    format: GraphFormat,
    one_based: bool,
}

impl GraphReader {
    /// Reader for zero-based signed files.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the edge-line format.
    pub fn with_format(mut self, format: GraphFormat) -> Self {
        self.format = format;
        self
    }

    /// Treat vertex ids as starting from 1.
    pub fn with_one_based(mut self, one_based: bool) -> Self {
        self.one_based = one_based;
        self
    }

    /// Read a graph file from disk.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<SignedGraph> {
        let file = File::open(path)?;
        self.read(BufReader::new(file))
    }

    /// Parse a graph from an in-memory string.
    pub fn parse(&self, text: &str) -> Result<SignedGraph> {
        self.read(text.as_bytes())
    }

    /// Parse a graph from any buffered reader.
    pub fn read<R: BufRead>(&self, reader: R) -> Result<SignedGraph> {
        let mut lines = reader.lines();

        let header = lines.next().transpose()?.ok_or(Error::Parse {
            line: 1,
            message: "missing header".to_string(),
        })?;
        let (n, declared_edges) = parse_header(&header)?;
        let mut graph = SignedGraph::new(n)?;

        let expected_tokens = match self.format {
            GraphFormat::Signed => 3,
            GraphFormat::Unsigned => 2,
        };

        for (idx, line) in lines.enumerate() {
            let line_no = idx + 2;
            let line = line?;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }
            if tokens.len() != expected_tokens {
                return Err(Error::Parse {
                    line: line_no,
                    message: format!(
                        "expected {expected_tokens} fields, found {}",
                        tokens.len()
                    ),
                });
            }

            let u = self.vertex(tokens[0], line_no)?;
            let v = self.vertex(tokens[1], line_no)?;
            let sign = match self.format {
                GraphFormat::Unsigned => Sign::Positive,
                GraphFormat::Signed => match tokens[2].parse::<Sign>() {
                    Ok(sign) => sign,
                    Err(_) => {
                        tracing::debug!(line = line_no, token = tokens[2], "skipping edge with malformed sign");
                        continue;
                    }
                },
            };
            if u == v {
                tracing::warn!(line = line_no, vertex = u, "skipping self-loop");
                continue;
            }

            let _ = graph.add_edge(u, v, sign)?;
        }

        if graph.edge_count() != declared_edges {
            tracing::debug!(
                declared = declared_edges,
                loaded = graph.edge_count(),
                "edge count differs from header"
            );
        }
        Ok(graph)
    }

    fn vertex(&self, token: &str, line: usize) -> Result<NodeId> {
        let id: usize = token.parse().map_err(|_| Error::Parse {
            line,
            message: format!("invalid vertex id '{token}'"),
        })?;
        if !self.one_based {
            return Ok(id);
        }
        id.checked_sub(1).ok_or(Error::Parse {
            line,
            message: "vertex id 0 in a one-based file".to_string(),
        })
    }
}

fn parse_header(header: &str) -> Result<(usize, usize)> {
    let fields: Vec<&str> = header.split_whitespace().collect();
    if fields.len() != 2 {
        return Err(Error::Parse {
            line: 1,
            message: "header must be '<vertex_count> <edge_count>'".to_string(),
        });
    }
    let parse = |field: &str| {
        field.parse::<usize>().map_err(|_| Error::Parse {
            line: 1,
            message: format!("invalid count '{field}'"),
        })
    };
    Ok((parse(fields[0])?, parse(fields[1])?))
}

/// Write `graph` in the signed `.g` format, one line per undirected edge.
pub fn write_graph<W: Write>(graph: &SignedGraph, mut writer: W) -> Result<()> {
    writeln!(writer, "{}\t{}", graph.node_count(), graph.edge_count())?;
    for (u, v, sign) in graph.edges() {
        writeln!(writer, "{u}\t{v}\t{sign}")?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_signed() {
        let text = "4 3\n0 1 1\n1 2 -1\n2 3 1\n";
        let graph = GraphReader::new().parse(text).unwrap();

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.sign(1, 2), Some(Sign::Negative));
        assert_eq!(graph.sign(3, 2), Some(Sign::Positive));
    }

    #[test]
    fn test_malformed_sign_is_skipped() {
        let text = "3 3\n0 1 1\n1 2 0\n0 2 x\n";
        let graph = GraphReader::new().parse(text).unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.sign(1, 2), None);
    }

    #[test]
    fn test_parse_unsigned() {
        let text = "3 2\n0 1\n1 2\n";
        let graph = GraphReader::new()
            .with_format(GraphFormat::Unsigned)
            .parse(text)
            .unwrap();

        assert_eq!(graph.edge_count(), 2);
        assert!(graph.edges().all(|(_, _, s)| s == Sign::Positive));
    }

    #[test]
    fn test_one_based_ids() {
        let text = "2 1\n1 2 -1\n";
        let graph = GraphReader::new().with_one_based(true).parse(text).unwrap();
        assert_eq!(graph.sign(0, 1), Some(Sign::Negative));

        let bad = GraphReader::new().with_one_based(true).parse("2 1\n0 1 1\n");
        assert!(matches!(bad, Err(Error::Parse { line: 2, .. })));
    }

    #[test]
    fn test_duplicate_edge_last_write_wins() {
        let text = "2 2\n0 1 1\n1 0 -1\n";
        let graph = GraphReader::new().parse(text).unwrap();
        assert_eq!(graph.sign(0, 1), Some(Sign::Negative));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            "weighted".parse::<GraphFormat>(),
            Err(Error::UnsupportedFormat("weighted".to_string()))
        );
        assert_eq!(GraphReader::new().parse("0 0\n"), Err(Error::EmptyInput));
        assert!(matches!(
            GraphReader::new().parse("3 1\n0 1\n"),
            Err(Error::Parse { line: 2, .. })
        ));
        assert_eq!(
            GraphReader::new().parse("2 1\n0 7 1\n"),
            Err(Error::VertexOutOfRange { vertex: 7, n: 2 })
        );
        assert!(matches!(
            GraphReader::new().parse(""),
            Err(Error::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_self_loop_skipped() {
        let graph = GraphReader::new().parse("2 2\n1 1 1\n0 1 -1\n").unwrap();
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_write_then_read() {
        let graph = SignedGraph::from_edges(
            3,
            [(0, 1, Sign::Positive), (0, 2, Sign::Negative)],
        )
        .unwrap();

        let mut buf = Vec::new();
        write_graph(&graph, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("3\t2\n"));
        assert!(text.contains("0\t2\t-1"));

        let reread = GraphReader::new().parse(&text).unwrap();
        assert_eq!(reread, graph);
    }
}
