#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]

//! Behavioural coverage for serving and scoring recommendations.

use std::cell::RefCell;

use campus_core::{
    CandidateEvent, EventId, EventSummary, Recommendations, Recommender, ScoredEvent, TagId,
    TagSpace,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

const EVENT_A: EventId = EventId(1);
const EVENT_B: EventId = EventId(2);
const EVENT_C: EventId = EventId(3);

/// Aggregate fixtures shared across the BDD scenarios.
pub struct TestContext {
    recommender: RefCell<Option<Recommender>>,
    events: RefCell<Vec<CandidateEvent>>,
    recent: RefCell<Vec<EventSummary>>,
    served: RefCell<Option<Recommendations>>,
    scored: RefCell<Option<Vec<ScoredEvent>>>,
}

#[fixture]
/// Build a fresh `TestContext` for each scenario run.
pub fn context() -> TestContext {
    TestContext {
        recommender: RefCell::new(None),
        events: RefCell::new(Vec::new()),
        recent: RefCell::new(Vec::new()),
        served: RefCell::new(None),
        scored: RefCell::new(None),
    }
}

#[given("a tag universe of three tags")]
fn tag_universe(context: &TestContext) {
    let space = TagSpace::new([TagId(1), TagId(2), TagId(3)]);
    *context.recommender.borrow_mut() = Some(Recommender::new(space));
}

#[given("events A tagged 1 and 2, B tagged 1, and C tagged 3")]
fn ranking_events(context: &TestContext) {
    *context.events.borrow_mut() = vec![
        CandidateEvent::new(EVENT_C, "C", [TagId(3)]),
        CandidateEvent::new(EVENT_B, "B", [TagId(1)]),
        CandidateEvent::new(EVENT_A, "A", [TagId(1), TagId(2)]),
    ];
    *context.recent.borrow_mut() = vec![
        EventSummary::new(EVENT_C, "C"),
        EventSummary::new(EVENT_B, "B"),
        EventSummary::new(EVENT_A, "A"),
    ];
}

#[when("a student interested in tags 1 and 2 asks for recommendations")]
fn serve_interested(context: &TestContext) {
    serve(context, &[TagId(1), TagId(2)]);
}

#[when("a student without interests asks for recommendations")]
fn serve_cold_start(context: &TestContext) {
    serve(context, &[]);
}

#[when("every event is scored for a student interested in tags 1 and 2")]
fn score_every_event(context: &TestContext) {
    let recommender = context.recommender.borrow();
    let scored = recommender
        .as_ref()
        .expect("recommender must be initialised")
        .score_all(&[TagId(1), TagId(2)], &context.events.borrow())
        .expect("score events");
    *context.scored.borrow_mut() = Some(scored);
}

#[then("the served events are A then B")]
fn served_a_then_b(context: &TestContext) {
    assert_eq!(served_ids(context), vec![EVENT_A, EVENT_B]);
}

#[then("event C is not served")]
fn c_not_served(context: &TestContext) {
    assert!(!served_ids(context).contains(&EVENT_C));
}

#[then("the served events are the recent events without scores")]
fn served_recent(context: &TestContext) {
    let served = context.served.borrow();
    let outcome = served.as_ref().expect("recommendations should be recorded");
    assert!(outcome.is_cold_start());
    assert_eq!(served_ids(context), vec![EVENT_C, EVENT_B, EVENT_A]);
    assert!(outcome.events().iter().all(|event| event.score.is_none()));
}

#[then("event C is listed last with a score of zero")]
fn c_listed_last(context: &TestContext) {
    let scored = context.scored.borrow();
    let last = scored
        .as_ref()
        .and_then(|events| events.last())
        .expect("scores should be recorded");
    assert_eq!(last.event_id, EVENT_C);
    assert_eq!(last.score, Some(0.0));
}

fn serve(context: &TestContext, interests: &[TagId]) {
    let recommender = context.recommender.borrow();
    let outcome = recommender
        .as_ref()
        .expect("recommender must be initialised")
        .recommend(interests, &context.events.borrow(), &context.recent.borrow())
        .expect("recommend events");
    *context.served.borrow_mut() = Some(outcome);
}

fn served_ids(context: &TestContext) -> Vec<EventId> {
    context
        .served
        .borrow()
        .as_ref()
        .expect("recommendations should be recorded")
        .events()
        .iter()
        .map(|event| event.event_id)
        .collect()
}

#[scenario(path = "tests/features/recommender.feature", index = 0)]
fn ranked_by_overlap(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/recommender.feature", index = 1)]
fn cold_start_lists_recent_events(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/recommender.feature", index = 2)]
fn score_all_keeps_zero_scores(context: TestContext) {
    let _ = context;
}
