use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use futures::future::AbortHandle;
use redacao::{
    AdapterError, AdapterKind, AnnotationSet, Annotator, Competency, EssayEvaluator,
    EvaluationError, GrammarChecker, GrammarIssue, RetryPolicy, Sentence, SentimentEstimator,
    Token,
    adapters::{FixedAnnotator, FixedGrammarChecker, FixedSentiment, UnavailableAdapter},
};

const ESSAY: &str = "A educação é a base da sociedade. Além disso, ela transforma vidas, porque \
                     forma cidadãos. Portanto, cabe ao Estado, agente principal, a ação de \
                     investir, por meio de verbas, com detalhamento das metas e a finalidade de \
                     reduzir desigualdades.";

fn annotations() -> AnnotationSet {
    AnnotationSet::new(
        vec![
            Token::new("A", "DET"),
            Token::new("educação", "NOUN"),
            Token::new("Além", "ADV"),
            Token::new("disso", "ADP"),
            Token::new("porque", "SCONJ"),
            Token::new("Portanto", "ADV"),
            Token::new("e", "CCONJ"),
        ],
        vec![
            Sentence::new("A educação é a base da sociedade."),
            Sentence::new("Além disso, ela transforma vidas, porque forma cidadãos."),
            Sentence::new(
                "Portanto, cabe ao Estado, agente principal, a ação de investir, por meio de \
                 verbas, com detalhamento das metas e a finalidade de reduzir desigualdades.",
            ),
        ],
    )
}

fn grammar_issues() -> Vec<GrammarIssue> {
    vec![
        GrammarIssue::builder()
            .category("PUNCTUATION")
            .rule_id("VIRGULA_SUJEITO")
            .build(),
        GrammarIssue::new("TYPOS"),
    ]
}

fn evaluator_with(
    annotator: Arc<dyn Annotator>,
    grammar_checker: Arc<dyn GrammarChecker>,
    sentiment: Arc<dyn SentimentEstimator>,
) -> EssayEvaluator {
    EssayEvaluator::builder()
        .annotator(annotator)
        .grammar_checker(grammar_checker)
        .sentiment(sentiment)
        .adapter_timeout(Duration::from_millis(200))
        .build()
}

fn fixed_evaluator() -> EssayEvaluator {
    evaluator_with(
        Arc::new(FixedAnnotator(annotations())),
        Arc::new(FixedGrammarChecker(grammar_issues())),
        Arc::new(FixedSentiment(0.2)),
    )
}

/// Counts calls and delegates to a fixed adapter.
#[derive(Default)]
struct Counting {
    calls: AtomicUsize,
}

impl Counting {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Annotator for Counting {
    async fn annotate(&self, _text: &str) -> Result<AnnotationSet, AdapterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(annotations())
    }
}

#[async_trait]
impl GrammarChecker for Counting {
    async fn check_grammar(&self, _text: &str) -> Result<Vec<GrammarIssue>, AdapterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(grammar_issues())
    }
}

#[async_trait]
impl SentimentEstimator for Counting {
    async fn estimate_polarity(&self, _text: &str) -> Result<f64, AdapterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(0.2)
    }
}

/// Grammar checker that never answers in time.
struct Stalled;

#[async_trait]
impl GrammarChecker for Stalled {
    async fn check_grammar(&self, _text: &str) -> Result<Vec<GrammarIssue>, AdapterError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(vec![])
    }
}

/// Sentiment estimator failing its first `failures` calls.
struct Flaky {
    failures: usize,
    calls:    AtomicUsize,
}

#[async_trait]
impl SentimentEstimator for Flaky {
    async fn estimate_polarity(&self, _text: &str) -> Result<f64, AdapterError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            Err(AdapterError::Transport("connection reset".into()))
        } else {
            Ok(0.2)
        }
    }
}

#[tokio::test]
async fn scores_every_competency() {
    let evaluation = fixed_evaluator().evaluate(ESSAY).await.expect("evaluate");
    let record = &evaluation.record;

    // 1 severe (punctuation) + 1 minor
    assert_eq!(record.norm.score, 180);
    assert_eq!(record.norm.total_issues, 2);
    assert_eq!(record.norm.severe_issues, 1);
    // round(1.2 * 100) + 2 conjunctions * 20
    assert_eq!(record.cohesion.score, 160);
    assert_eq!(record.cohesion.connectives, vec!["porque", "e"]);
    // "porque" and "Portanto"
    assert_eq!(record.argumentation.score, 60);
    // "além disso" in one sentence
    assert_eq!(record.advanced_cohesion.score, 25);
    assert_eq!(record.intervention.score, 200);
    assert!(record.intervention.all_present);

    assert_eq!(record.total(), 180 + 160 + 60 + 25 + 200);
    for (_, score) in record.scores() {
        assert!(score <= 200);
    }

    let remarks = evaluation.feedback.remarks();
    assert_eq!(remarks.len(), 4);
    assert_eq!(
        evaluation.feedback.total_line(),
        redacao::grade::generate_feedback(record).total_line()
    );
    assert!(
        evaluation
            .feedback
            .total_line()
            .starts_with("Total: 625 / 1000.")
    );
    assert!(record.score(Competency::Intervention) == 200);
}

#[tokio::test]
async fn evaluation_is_idempotent() {
    let evaluator = fixed_evaluator();

    let first = evaluator.evaluate(ESSAY).await.expect("first");
    let second = evaluator.evaluate(ESSAY).await.expect("second");

    assert_eq!(
        serde_json::to_string(&first).expect("serialize"),
        serde_json::to_string(&second).expect("serialize")
    );
    assert_eq!(first.feedback.to_string(), second.feedback.to_string());
}

#[tokio::test]
async fn each_adapter_runs_once_per_essay() {
    let annotator = Arc::new(Counting::default());
    let checker = Arc::new(Counting::default());
    let sentiment = Arc::new(Counting::default());
    let evaluator = evaluator_with(annotator.clone(), checker.clone(), sentiment.clone());

    evaluator.evaluate(ESSAY).await.expect("evaluate");

    assert_eq!(annotator.calls(), 1);
    assert_eq!(checker.calls(), 1);
    assert_eq!(sentiment.calls(), 1);
}

#[tokio::test]
async fn empty_text_is_rejected_before_adapters() {
    let annotator = Arc::new(Counting::default());
    let checker = Arc::new(Counting::default());
    let sentiment = Arc::new(Counting::default());
    let evaluator = evaluator_with(annotator.clone(), checker.clone(), sentiment.clone());

    for text in ["", "   \n\t "] {
        let err = evaluator.evaluate(text).await.expect_err("must reject");
        assert!(matches!(err, EvaluationError::InvalidInput(_)));
    }

    assert_eq!(annotator.calls() + checker.calls() + sentiment.calls(), 0);
}

#[tokio::test]
async fn unavailable_grammar_checker_aborts() {
    let evaluator = evaluator_with(
        Arc::new(FixedAnnotator(annotations())),
        Arc::new(UnavailableAdapter::new("languagetool is down")),
        Arc::new(FixedSentiment(0.2)),
    );

    let err = evaluator.evaluate(ESSAY).await.expect_err("must fail");

    match err {
        EvaluationError::AdapterUnavailable { adapter, source } => {
            assert_eq!(adapter, AdapterKind::GrammarChecker);
            assert!(source.to_string().contains("languagetool is down"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn out_of_range_polarity_is_malformed() {
    for polarity in [1.5, -1.01, f64::NAN] {
        let evaluator = evaluator_with(
            Arc::new(FixedAnnotator(annotations())),
            Arc::new(FixedGrammarChecker(vec![])),
            Arc::new(FixedSentiment(polarity)),
        );

        let err = evaluator.evaluate(ESSAY).await.expect_err("must fail");
        assert!(matches!(
            err,
            EvaluationError::AdapterUnavailable {
                adapter: AdapterKind::SentimentEstimator,
                source:  AdapterError::Malformed(_),
            }
        ));
    }
}

#[tokio::test]
async fn stalled_adapter_times_out() {
    let evaluator = evaluator_with(
        Arc::new(FixedAnnotator(annotations())),
        Arc::new(Stalled),
        Arc::new(FixedSentiment(0.2)),
    );

    let err = evaluator.evaluate(ESSAY).await.expect_err("must time out");

    assert!(matches!(
        err,
        EvaluationError::AdapterUnavailable {
            adapter: AdapterKind::GrammarChecker,
            source:  AdapterError::Timeout(_),
        }
    ));
}

#[tokio::test]
async fn fails_fast_without_retries() {
    let sentiment = Arc::new(Flaky {
        failures: 1,
        calls:    AtomicUsize::new(0),
    });
    let evaluator = evaluator_with(
        Arc::new(FixedAnnotator(annotations())),
        Arc::new(FixedGrammarChecker(vec![])),
        sentiment.clone(),
    );

    assert!(evaluator.evaluate(ESSAY).await.is_err());
    assert_eq!(sentiment.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn retries_recover_from_transient_failures() {
    let sentiment = Arc::new(Flaky {
        failures: 2,
        calls:    AtomicUsize::new(0),
    });
    let evaluator = EssayEvaluator::builder()
        .annotator(Arc::new(FixedAnnotator(annotations())))
        .grammar_checker(Arc::new(FixedGrammarChecker(vec![])))
        .sentiment(sentiment.clone())
        .retry(RetryPolicy::new(2, Duration::from_millis(1)))
        .build();

    let evaluation = evaluator.evaluate(ESSAY).await.expect("recovers");

    assert_eq!(sentiment.calls.load(Ordering::SeqCst), 3);
    assert_eq!(evaluation.record.norm.score, 200);
}

#[tokio::test]
async fn batch_keeps_input_order() {
    let evaluator = fixed_evaluator();
    let (_handle, registration) = AbortHandle::new_pair();

    let results = evaluator
        .evaluate_batch([ESSAY, "", ESSAY], registration)
        .await
        .expect("not aborted");

    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(EvaluationError::InvalidInput(_))));
    assert_eq!(
        results[2].as_ref().map(|e| e.record.total()).ok(),
        results[0].as_ref().map(|e| e.record.total()).ok()
    );
}

#[tokio::test]
async fn batch_can_be_aborted() {
    let evaluator = evaluator_with(
        Arc::new(FixedAnnotator(annotations())),
        Arc::new(Stalled),
        Arc::new(FixedSentiment(0.2)),
    );
    let (handle, registration) = AbortHandle::new_pair();

    let batch = evaluator.evaluate_batch(vec![ESSAY.to_string(); 3], registration);
    handle.abort();

    assert!(batch.await.is_err());
}
