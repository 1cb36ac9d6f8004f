//! Latent Dirichlet Allocation.
//!
//! Topics are fitted with collapsed Gibbs sampling over the document-term
//! matrix. The sampler draws from a `ChaCha8Rng` seeded by the caller, so a
//! given matrix and parameter set always produce the same model.
//!
//! After fitting:
//! - `beta[k][w] = (n_kw + beta) / (n_k + V * beta)`
//! - `theta[d][k] = (n_dk + alpha) / (n_d + K * alpha)`
//!
//! Convergence is judged from the relative change in corpus log-likelihood
//! between periodic checks. A model that does not converge within the
//! iteration budget is still returned, flagged in its diagnostics.

use discourse_corpus::DocId;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{AnalysisError, ConfigurationError, DocumentTermMatrix};

/// Sweeps between log-likelihood checks.
const CHECK_INTERVAL: usize = 10;

/// Parameters of a topic model fit.
#[derive(Debug, Clone, PartialEq)]
pub struct LdaParams {
    /// Number of topics, K.
    pub topics: usize,
    /// Sampler seed.
    pub seed: u64,
    /// Maximum Gibbs sweeps.
    pub iterations: usize,
    /// Document-topic prior; `1 / K` when unset.
    pub alpha: Option<f64>,
    /// Topic-term prior.
    pub beta: f64,
    /// Relative log-likelihood change below which the fit has converged.
    pub tolerance: f64,
}

impl Default for LdaParams {
    fn default() -> Self {
        Self {
            topics: 5,
            seed: 42,
            iterations: 1000,
            alpha: None,
            beta: 0.01,
            tolerance: 1e-4,
        }
    }
}

impl LdaParams {
    /// Checks that counts are positive and priors are positive and finite.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.topics == 0 {
            return Err(ConfigurationError::NonPositive {
                name: "topics.count",
            });
        }
        if self.iterations == 0 {
            return Err(ConfigurationError::NonPositive {
                name: "topics.iterations",
            });
        }
        if let Some(alpha) = self.alpha {
            check_positive("topics.alpha", alpha)?;
        }
        check_positive("topics.beta", self.beta)?;
        check_positive("topics.tolerance", self.tolerance)
    }

    /// Returns the effective document-topic prior.
    pub fn effective_alpha(&self) -> f64 {
        self.alpha.unwrap_or(1.0 / self.topics as f64)
    }
}

/// Rejects values that are not positive finite numbers.
fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidPrior { name, value })
    }
}

/// How a fit ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TopicDiagnostics {
    /// Gibbs sweeps performed.
    pub iterations: usize,
    /// Corpus log-likelihood at the last check.
    pub log_likelihood: f64,
    /// Whether the relative log-likelihood change fell below tolerance.
    pub converged: bool,
}

/// A term's weight within a topic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicTerm {
    /// Topic index.
    pub topic: usize,
    /// Vocabulary term.
    pub term: String,
    /// Probability of the term under the topic.
    pub weight: f64,
}

/// A topic's share of a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentTopic {
    /// Document id.
    pub document: DocId,
    /// Topic index.
    pub topic: usize,
    /// Probability of the topic in the document.
    pub weight: f64,
}

/// Top terms of one topic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicSummary {
    /// Topic index.
    pub topic: usize,
    /// Highest-weight terms, descending.
    pub terms: Vec<TopicTerm>,
}

/// A fitted topic model.
#[derive(Debug, Clone)]
pub struct TopicModel {
    /// Column labels of the fitted matrix.
    vocabulary: Vec<String>,
    /// Row labels of the fitted matrix.
    documents: Vec<DocId>,
    /// Topic-term distributions, K rows of V.
    beta: Vec<Vec<f64>>,
    /// Document-topic mixtures, D rows of K.
    theta: Vec<Vec<f64>>,
    /// Fit outcome.
    diagnostics: TopicDiagnostics,
}

impl TopicModel {
    /// Fits a model to `matrix`.
    ///
    /// Fails when the parameters are invalid, when the matrix has fewer
    /// distinct terms than topics, or when it holds no tokens.
    ///
    /// There is no minimum document count. Every topic is a distribution
    /// over the vocabulary, and a single document with at least K distinct
    /// terms still gives the sampler K distinguishable term assignments.
    /// Only theta degenerates, to one row.
    pub fn fit(matrix: &DocumentTermMatrix, params: &LdaParams) -> Result<Self, AnalysisError> {
        params.validate()?;

        if matrix.document_count() == 0 {
            return Err(AnalysisError::EmptyCorpus);
        }
        if matrix.term_count() < params.topics || matrix.total_tokens() == 0 {
            return Err(AnalysisError::InsufficientData {
                documents: matrix.document_count(),
                vocabulary: matrix.term_count(),
                topics: params.topics,
            });
        }

        let mut sampler = GibbsSampler::new(matrix, params);
        let mut previous: Option<f64> = None;
        let mut diagnostics = TopicDiagnostics {
            iterations: 0,
            log_likelihood: f64::NAN,
            converged: false,
        };

        for iteration in 1..=params.iterations {
            sampler.sweep();
            diagnostics.iterations = iteration;

            if iteration % CHECK_INTERVAL != 0 && iteration != params.iterations {
                continue;
            }

            let log_likelihood = sampler.log_likelihood();
            diagnostics.log_likelihood = log_likelihood;
            if !log_likelihood.is_finite() {
                break;
            }

            if let Some(prev) = previous {
                let change = ((log_likelihood - prev) / prev).abs();
                debug!(iteration, log_likelihood, change, "gibbs sweep");
                if change < params.tolerance {
                    diagnostics.converged = true;
                    break;
                }
            }
            previous = Some(log_likelihood);
        }

        if !diagnostics.log_likelihood.is_finite() {
            warn!(
                iterations = diagnostics.iterations,
                "topic model log-likelihood is not finite"
            );
        } else if !diagnostics.converged {
            warn!(
                iterations = diagnostics.iterations,
                log_likelihood = diagnostics.log_likelihood,
                "topic model did not converge within the iteration budget"
            );
        }

        Ok(Self {
            vocabulary: matrix.vocabulary().to_vec(),
            documents: matrix.documents().to_vec(),
            beta: sampler.topic_term_distributions(),
            theta: sampler.document_topic_mixtures(),
            diagnostics,
        })
    }

    /// Returns the number of topics.
    pub fn topic_count(&self) -> usize {
        self.beta.len()
    }

    /// Returns the vocabulary the model was fitted on.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Returns the documents the model was fitted on.
    pub fn documents(&self) -> &[DocId] {
        &self.documents
    }

    /// Returns the term distribution of `topic`, aligned with the vocabulary.
    pub fn beta(&self, topic: usize) -> &[f64] {
        &self.beta[topic]
    }

    /// Returns the topic mixture of the document at `index`.
    pub fn theta(&self, index: usize) -> &[f64] {
        &self.theta[index]
    }

    /// Returns how the fit ended.
    pub fn diagnostics(&self) -> TopicDiagnostics {
        self.diagnostics
    }

    /// Returns the `n` highest-weight terms of `topic`.
    ///
    /// Equal weights keep vocabulary order.
    pub fn top_terms(&self, topic: usize, n: usize) -> Vec<TopicTerm> {
        let weights = &self.beta[topic];
        let mut order: Vec<usize> = (0..weights.len()).collect();
        order.sort_by(|&a, &b| weights[b].total_cmp(&weights[a]).then(a.cmp(&b)));

        order
            .into_iter()
            .take(n)
            .map(|w| TopicTerm {
                topic,
                term: self.vocabulary[w].clone(),
                weight: weights[w],
            })
            .collect()
    }

    /// Returns the top `n` terms of every topic.
    pub fn summaries(&self, n: usize) -> Vec<TopicSummary> {
        (0..self.topic_count())
            .map(|topic| TopicSummary {
                topic,
                terms: self.top_terms(topic, n),
            })
            .collect()
    }

    /// Returns the full topic-term table, one row per (topic, term).
    pub fn term_weights(&self) -> Vec<TopicTerm> {
        self.beta
            .iter()
            .enumerate()
            .flat_map(|(topic, weights)| {
                weights
                    .iter()
                    .zip(&self.vocabulary)
                    .map(move |(&weight, term)| TopicTerm {
                        topic,
                        term: term.clone(),
                        weight,
                    })
            })
            .collect()
    }

    /// Returns the document-topic table, one row per (document, topic).
    pub fn document_topics(&self) -> Vec<DocumentTopic> {
        self.theta
            .iter()
            .zip(&self.documents)
            .flat_map(|(mixture, document)| {
                mixture
                    .iter()
                    .enumerate()
                    .map(move |(topic, &weight)| DocumentTopic {
                        document: document.clone(),
                        topic,
                        weight,
                    })
            })
            .collect()
    }

    /// Returns the most probable topic of the document at `index`.
    pub fn dominant_topic(&self, index: usize) -> usize {
        self.theta[index]
            .iter()
            .enumerate()
            .max_by(|(a, x), (b, y)| x.total_cmp(y).then(b.cmp(a)))
            .map_or(0, |(topic, _)| topic)
    }
}

/// Collapsed Gibbs sampler state.
struct GibbsSampler<'m> {
    /// Matrix being fitted.
    matrix: &'m DocumentTermMatrix,
    /// Document-topic prior.
    alpha: f64,
    /// Topic-term prior.
    beta: f64,
    /// `(document, term)` of every token occurrence.
    tokens: Vec<(usize, usize)>,
    /// Topic currently assigned to each token.
    assignments: Vec<usize>,
    /// Tokens per (document, topic).
    doc_topic: Vec<Vec<u32>>,
    /// Tokens per (topic, term).
    topic_term: Vec<Vec<u32>>,
    /// Tokens per topic.
    topic_totals: Vec<u32>,
    /// Cumulative sampling weights, reused across draws.
    weights: Vec<f64>,
    /// Seeded random source.
    rng: ChaCha8Rng,
}

impl<'m> GibbsSampler<'m> {
    /// Expands the matrix into tokens and assigns each a random topic.
    fn new(matrix: &'m DocumentTermMatrix, params: &LdaParams) -> Self {
        let topics = params.topics;
        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);

        let mut tokens = Vec::new();
        for document in 0..matrix.document_count() {
            for &(term, count) in matrix.row(document) {
                tokens.extend((0..count).map(|_| (document, term)));
            }
        }

        let mut doc_topic = vec![vec![0_u32; topics]; matrix.document_count()];
        let mut topic_term = vec![vec![0_u32; matrix.term_count()]; topics];
        let mut topic_totals = vec![0_u32; topics];
        let assignments: Vec<usize> = tokens
            .iter()
            .map(|&(document, term)| {
                let topic = rng.gen_range(0..topics);
                doc_topic[document][topic] += 1;
                topic_term[topic][term] += 1;
                topic_totals[topic] += 1;
                topic
            })
            .collect();

        Self {
            matrix,
            alpha: params.effective_alpha(),
            beta: params.beta,
            tokens,
            assignments,
            doc_topic,
            topic_term,
            topic_totals,
            weights: vec![0.0; topics],
            rng,
        }
    }

    /// Resamples the topic of every token once.
    fn sweep(&mut self) {
        let beta_sum = self.beta * self.matrix.term_count() as f64;

        for (&(document, term), assignment) in self.tokens.iter().zip(&mut self.assignments) {
            let old = *assignment;
            self.doc_topic[document][old] -= 1;
            self.topic_term[old][term] -= 1;
            self.topic_totals[old] -= 1;

            let mut cumulative = 0.0;
            for (((slot, &in_doc), term_counts), &in_topic) in self
                .weights
                .iter_mut()
                .zip(&self.doc_topic[document])
                .zip(&self.topic_term)
                .zip(&self.topic_totals)
            {
                cumulative += (f64::from(in_doc) + self.alpha)
                    * (f64::from(term_counts[term]) + self.beta)
                    / (f64::from(in_topic) + beta_sum);
                *slot = cumulative;
            }

            let draw = self.rng.r#gen::<f64>() * cumulative;
            let new = self
                .weights
                .iter()
                .position(|&bound| draw < bound)
                .unwrap_or(self.weights.len() - 1);

            *assignment = new;
            self.doc_topic[document][new] += 1;
            self.topic_term[new][term] += 1;
            self.topic_totals[new] += 1;
        }
    }

    /// Smoothed topic-term distributions.
    fn topic_term_distributions(&self) -> Vec<Vec<f64>> {
        let beta_sum = self.beta * self.matrix.term_count() as f64;
        self.topic_term
            .iter()
            .zip(&self.topic_totals)
            .map(|(counts, &total)| {
                let denominator = f64::from(total) + beta_sum;
                counts
                    .iter()
                    .map(|&count| (f64::from(count) + self.beta) / denominator)
                    .collect()
            })
            .collect()
    }

    /// Smoothed document-topic mixtures.
    fn document_topic_mixtures(&self) -> Vec<Vec<f64>> {
        let alpha_sum = self.alpha * self.topic_totals.len() as f64;
        self.doc_topic
            .iter()
            .map(|counts| {
                let total: u32 = counts.iter().sum();
                let denominator = f64::from(total) + alpha_sum;
                counts
                    .iter()
                    .map(|&count| (f64::from(count) + self.alpha) / denominator)
                    .collect()
            })
            .collect()
    }

    /// Corpus log-likelihood under the current estimates.
    fn log_likelihood(&self) -> f64 {
        let beta = self.topic_term_distributions();
        let theta = self.document_topic_mixtures();

        let mut total = 0.0;
        for (document, mixture) in theta.iter().enumerate() {
            for &(term, count) in self.matrix.row(document) {
                let probability: f64 = mixture
                    .iter()
                    .zip(&beta)
                    .map(|(&share, weights)| share * weights[term])
                    .sum();
                total += f64::from(count) * probability.ln();
            }
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use discourse_corpus::Corpus;

    use super::*;
    use crate::{Stopwords, TermIndex, Tokenizer};

    /// Builds the matrix of `pairs` with no stopwords.
    fn matrix(pairs: &[(&str, &str)]) -> DocumentTermMatrix {
        let corpus = Corpus::from_pairs(pairs.iter().copied()).unwrap();
        let stopwords = Stopwords::default();
        TermIndex::build(&corpus, &Tokenizer::new(&stopwords))
            .unwrap()
            .matrix()
    }

    /// Two clearly separated themes.
    fn themed_matrix() -> DocumentTermMatrix {
        let health = "saúde hospital médico ".repeat(20);
        let school = "escola professor aluno ".repeat(20);
        matrix(&[
            ("h1.txt", health.as_str()),
            ("h2.txt", health.as_str()),
            ("s1.txt", school.as_str()),
            ("s2.txt", school.as_str()),
        ])
    }

    /// Parameters for quick fits.
    fn params(topics: usize) -> LdaParams {
        LdaParams {
            topics,
            iterations: 200,
            ..LdaParams::default()
        }
    }

    #[test]
    fn distributions_sum_to_one() {
        let model = TopicModel::fit(&themed_matrix(), &params(2)).unwrap();

        for topic in 0..model.topic_count() {
            let sum: f64 = model.beta(topic).iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "beta row {topic} sums to {sum}");
        }
        for document in 0..model.documents().len() {
            let sum: f64 = model.theta(document).iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "theta row {document} sums to {sum}");
        }
    }

    #[test]
    fn same_seed_gives_same_model() {
        let matrix = themed_matrix();
        let first = TopicModel::fit(&matrix, &params(2)).unwrap();
        let second = TopicModel::fit(&matrix, &params(2)).unwrap();

        assert_eq!(first.term_weights(), second.term_weights());
        assert_eq!(first.document_topics(), second.document_topics());
        assert_eq!(first.diagnostics(), second.diagnostics());
    }

    #[test]
    fn separated_themes_get_separate_topics() {
        let model = TopicModel::fit(&themed_matrix(), &params(2)).unwrap();

        assert_eq!(model.dominant_topic(0), model.dominant_topic(1));
        assert_eq!(model.dominant_topic(2), model.dominant_topic(3));
        assert_ne!(model.dominant_topic(0), model.dominant_topic(2));
    }

    #[test]
    fn top_terms_are_ranked() {
        let model = TopicModel::fit(&themed_matrix(), &params(2)).unwrap();
        let top = model.top_terms(0, 4);

        assert_eq!(top.len(), 4);
        assert!(top.windows(2).all(|w| w[0].weight >= w[1].weight));
        assert!(top.iter().all(|t| t.topic == 0));
    }

    #[test]
    fn more_topics_than_terms_is_insufficient() {
        let matrix = matrix(&[("a.txt", "saúde escola"), ("b.txt", "saúde")]);
        let err = TopicModel::fit(&matrix, &params(3)).unwrap_err();

        assert!(matches!(
            err,
            AnalysisError::InsufficientData {
                documents: 2,
                vocabulary: 2,
                topics: 3
            }
        ));
    }

    #[test]
    fn zero_topics_is_a_configuration_error() {
        let err = TopicModel::fit(&themed_matrix(), &params(0)).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Configuration(ConfigurationError::NonPositive {
                name: "topics.count"
            })
        ));
    }

    #[test]
    fn invalid_priors_are_rejected() {
        let params = LdaParams {
            beta: 0.0,
            ..LdaParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigurationError::InvalidPrior {
                name: "topics.beta",
                ..
            })
        ));

        let params = LdaParams {
            alpha: Some(f64::NAN),
            ..LdaParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn default_alpha_is_inverse_topic_count() {
        assert!((params(4).effective_alpha() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn short_budget_reports_not_converged() {
        let params = LdaParams {
            topics: 2,
            iterations: 1,
            ..LdaParams::default()
        };
        let model = TopicModel::fit(&themed_matrix(), &params).unwrap();
        let diagnostics = model.diagnostics();

        assert_eq!(diagnostics.iterations, 1);
        assert!(!diagnostics.converged);
        assert!(diagnostics.log_likelihood.is_finite());
    }

    #[test]
    fn empty_documents_get_uniform_mixture() {
        let matrix = matrix(&[("a.txt", "saúde escola hospital"), ("b.txt", "")]);
        let model = TopicModel::fit(&matrix, &params(2)).unwrap();

        assert_eq!(model.theta(1), &[0.5, 0.5]);
    }
}
