//! Bigram co-occurrence graph.
//!
//! Adjacent word pairs are counted over the unfiltered word stream of each
//! document, then pairs touching a stopword are dropped. A pair becomes a
//! directed edge `first -> second` only when its count strictly exceeds the
//! threshold; nodes exist only as edge endpoints.

use std::collections::{BTreeMap, BTreeSet};

use discourse_corpus::Corpus;
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::{AnalysisError, Tokenizer};

/// Counts of ordered adjacent pairs.
pub type PairCounts = BTreeMap<(String, String), u64>;

/// A directed, weighted edge of the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CooccurrenceEdge {
    /// Earlier word of the pair.
    pub source: String,
    /// Later word of the pair.
    pub target: String,
    /// Times the pair occurred.
    pub count: u64,
}

/// Weighted degree of a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeStrength {
    /// Term.
    pub term: String,
    /// Sum of incoming edge weights.
    pub incoming: u64,
    /// Sum of outgoing edge weights.
    pub outgoing: u64,
}

/// Counts non-stopword adjacent pairs across `corpus`.
///
/// Windows never span two documents.
pub fn count_pairs(corpus: &Corpus, tokenizer: &Tokenizer<'_>) -> PairCounts {
    let per_document: Vec<PairCounts> = corpus
        .documents()
        .par_iter()
        .map(|doc| {
            let mut counts = PairCounts::new();
            for gram in tokenizer.bigrams(&doc.text) {
                let Ok([first, second]) = <[String; 2]>::try_from(gram.terms) else {
                    continue;
                };
                let stopwords = tokenizer.stopwords();
                if stopwords.contains(&first) || stopwords.contains(&second) {
                    continue;
                }
                *counts.entry((first, second)).or_insert(0) += 1;
            }
            counts
        })
        .collect();

    let mut totals = PairCounts::new();
    for counts in per_document {
        for (pair, count) in counts {
            *totals.entry(pair).or_insert(0) += count;
        }
    }
    totals
}

/// Directed graph of frequent adjacent pairs.
#[derive(Debug, Clone)]
pub struct CooccurrenceGraph {
    /// Terms as nodes, pair counts as edge weights.
    graph: DiGraph<String, u64>,
    /// Strict lower bound on edge weights.
    threshold: u64,
}

impl CooccurrenceGraph {
    /// Builds the graph for `corpus`.
    pub fn build(
        corpus: &Corpus,
        tokenizer: &Tokenizer<'_>,
        threshold: u64,
    ) -> Result<Self, AnalysisError> {
        if corpus.is_empty() {
            return Err(AnalysisError::EmptyCorpus);
        }

        let pairs = count_pairs(corpus, tokenizer);
        let graph = Self::from_pair_counts(&pairs, threshold);
        debug!(
            pairs = pairs.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            threshold,
            "built co-occurrence graph"
        );
        Ok(graph)
    }

    /// Builds the graph from pre-computed pair counts.
    ///
    /// Nodes are inserted in term order, so node indices are deterministic.
    pub fn from_pair_counts(pairs: &PairCounts, threshold: u64) -> Self {
        let kept: Vec<(&(String, String), u64)> = pairs
            .iter()
            .filter(|&(_, &count)| count > threshold)
            .map(|(pair, &count)| (pair, count))
            .collect();

        let terms: BTreeSet<&str> = kept
            .iter()
            .flat_map(|((first, second), _)| [first.as_str(), second.as_str()])
            .collect();

        let mut graph = DiGraph::with_capacity(terms.len(), kept.len());
        let nodes: BTreeMap<&str, NodeIndex> = terms
            .into_iter()
            .map(|term| (term, graph.add_node(term.to_string())))
            .collect();
        for ((first, second), count) in kept {
            graph.add_edge(nodes[first.as_str()], nodes[second.as_str()], count);
        }

        Self { graph, threshold }
    }

    /// Returns the underlying graph.
    pub fn graph(&self) -> &DiGraph<String, u64> {
        &self.graph
    }

    /// Returns the threshold the graph was built with.
    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Returns the number of terms.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns the weight of the edge `source -> target`.
    pub fn weight(&self, source: &str, target: &str) -> Option<u64> {
        let from = self.node(source)?;
        let to = self.node(target)?;
        self.graph
            .find_edge(from, to)
            .and_then(|edge| self.graph.edge_weight(edge))
            .copied()
    }

    /// Returns edges by descending count, then by source and target.
    pub fn edges(&self) -> Vec<CooccurrenceEdge> {
        let mut edges: Vec<CooccurrenceEdge> = self
            .graph
            .edge_references()
            .map(|edge| CooccurrenceEdge {
                source: self.graph[edge.source()].clone(),
                target: self.graph[edge.target()].clone(),
                count: *edge.weight(),
            })
            .collect();
        edges.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.source.cmp(&b.source))
                .then_with(|| a.target.cmp(&b.target))
        });
        edges
    }

    /// Returns the weighted in- and out-degree of every term, in term order.
    pub fn strengths(&self) -> Vec<NodeStrength> {
        self.graph
            .node_indices()
            .map(|node| NodeStrength {
                term: self.graph[node].clone(),
                incoming: self.directed_weight(node, Direction::Incoming),
                outgoing: self.directed_weight(node, Direction::Outgoing),
            })
            .collect()
    }

    /// Sums edge weights on one side of `node`.
    fn directed_weight(&self, node: NodeIndex, direction: Direction) -> u64 {
        self.graph
            .edges_directed(node, direction)
            .map(|edge| *edge.weight())
            .sum()
    }

    /// Finds the node of `term`.
    fn node(&self, term: &str) -> Option<NodeIndex> {
        // Nodes were added in sorted order.
        self.graph
            .raw_nodes()
            .binary_search_by(|node| node.weight.as_str().cmp(term))
            .ok()
            .map(NodeIndex::new)
    }
}
