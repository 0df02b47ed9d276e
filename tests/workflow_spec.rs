//! Capture and deep-search workflow tests, run against a scripted assist
//! backend.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use ideaflow::app::{App, DeepSearchStart, DeepSearchState, DEGRADED_SEARCH_TEXT, NOTICE_TTL};
use ideaflow::assist::{Assist, AssistError, Enhancement};
use ideaflow::models::*;
use ideaflow::store::{keys, KvStore, MemoryStore};
use uuid::Uuid;

/// Scripted assist backend. `None` responses fail the call.
#[derive(Clone, Default)]
struct StubAssist {
    enhancement: Option<Enhancement>,
    insights: Option<WebInsights>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl StubAssist {
    fn failing() -> Self {
        Self::default()
    }

    fn with_enhancement(enhancement: Enhancement) -> Self {
        Self {
            enhancement: Some(enhancement),
            ..Default::default()
        }
    }

    fn with_insights(insights: WebInsights) -> Self {
        Self {
            insights: Some(insights),
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

fn unavailable() -> AssistError {
    AssistError::Status(
        reqwest::StatusCode::SERVICE_UNAVAILABLE,
        "unavailable".to_string(),
    )
}

impl Assist for StubAssist {
    async fn enhance(&self, content: &str) -> Result<Enhancement, AssistError> {
        self.calls.lock().unwrap().push(format!("enhance:{content}"));
        self.enhancement.clone().ok_or_else(unavailable)
    }

    async fn search_web(&self, query: &str) -> Result<WebInsights, AssistError> {
        self.calls.lock().unwrap().push(format!("search:{query}"));
        self.insights.clone().ok_or_else(unavailable)
    }
}

fn make_user(plan: SubscriptionPlan) -> User {
    User {
        id: Uuid::new_v4(),
        email: "ada@example.com".to_string(),
        username: "ada".to_string(),
        password: Some("hunter2".to_string()),
        is_admin: false,
        notifications_enabled: true,
        joined_at: Utc::now(),
        subscription_plan: plan,
        subscription_active: plan != SubscriptionPlan::Free,
        paypal_subscription_id: None,
        has_completed_tour: true,
        mobile_launch_status: None,
    }
}

fn signed_in_app(
    store: &MemoryStore,
    assist: StubAssist,
    plan: SubscriptionPlan,
) -> App<MemoryStore, StubAssist> {
    let mut app = App::new(store.clone(), assist).expect("Failed to build app");
    app.sign_in(make_user(plan)).expect("Failed to sign in");
    app
}

mod capture_workflow {
    use super::*;

    #[tokio::test]
    async fn merges_caller_and_enhancement_tags() {
        let store = MemoryStore::new();
        let assist = StubAssist::with_enhancement(Enhancement {
            summary: None,
            tags: Some(vec!["errand".to_string()]),
        });
        let mut app = signed_in_app(&store, assist, SubscriptionPlan::Pro);

        let idea = app
            .create_idea("Buy milk", IdeaSource::Typed, Category::Task, Vec::new())
            .await
            .unwrap()
            .expect("Capture refused");

        assert_eq!(idea.tags, vec!["errand"]);
        assert_eq!(idea.category, Category::Task);
        assert_eq!(idea.source, IdeaSource::Typed);
        assert!(!idea.starred);
    }

    #[tokio::test]
    async fn collapses_duplicate_tags_preserving_first_occurrence() {
        let store = MemoryStore::new();
        let assist = StubAssist::with_enhancement(Enhancement {
            summary: Some("short".to_string()),
            tags: Some(vec!["errand".to_string(), "shopping".to_string()]),
        });
        let mut app = signed_in_app(&store, assist, SubscriptionPlan::Pro);

        let idea = app
            .create_idea(
                "Buy milk",
                IdeaSource::Typed,
                Category::Task,
                vec!["errand".to_string()],
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(idea.tags, vec!["errand", "shopping"]);
        assert_eq!(idea.ai_summary.as_deref(), Some("short"));
    }

    #[tokio::test]
    async fn proceeds_without_enrichment_when_the_call_fails() {
        let store = MemoryStore::new();
        let mut app = signed_in_app(&store, StubAssist::failing(), SubscriptionPlan::Pro);

        let idea = app
            .create_idea(
                "Buy milk",
                IdeaSource::Voice,
                Category::Task,
                vec!["errand".to_string()],
            )
            .await
            .unwrap()
            .expect("Capture must survive a failed enhancement");

        assert_eq!(idea.tags, vec!["errand"]);
        assert!(idea.ai_summary.is_none());
    }

    #[tokio::test]
    async fn whitespace_content_is_a_no_op_with_no_write_and_no_call() {
        let store = MemoryStore::new();
        let assist = StubAssist::failing();
        let mut app = signed_in_app(&store, assist.clone(), SubscriptionPlan::Pro);

        let result = app
            .create_idea("   \n", IdeaSource::Typed, Category::Note, Vec::new())
            .await
            .unwrap();

        assert!(result.is_none());
        assert!(store.load(keys::IDEAS).unwrap().is_none());
        assert!(assist.calls().is_empty());
    }

    #[tokio::test]
    async fn capture_without_a_session_is_a_no_op() {
        let store = MemoryStore::new();
        let assist = StubAssist::failing();
        let mut app = App::new(store.clone(), assist.clone()).unwrap();

        let result = app
            .create_idea("orphan", IdeaSource::Typed, Category::Note, Vec::new())
            .await
            .unwrap();

        assert!(result.is_none());
        assert!(store.load(keys::IDEAS).unwrap().is_none());
        assert!(assist.calls().is_empty());
    }

    #[tokio::test]
    async fn prepends_new_ideas_with_unique_ids() {
        let store = MemoryStore::new();
        let mut app = signed_in_app(&store, StubAssist::failing(), SubscriptionPlan::Pro);

        let first = app
            .create_idea("first", IdeaSource::Typed, Category::Note, Vec::new())
            .await
            .unwrap()
            .unwrap();
        let second = app
            .create_idea("second", IdeaSource::Typed, Category::Note, Vec::new())
            .await
            .unwrap()
            .unwrap();

        assert_ne!(first.id, second.id);

        let visible = app.user_ideas();
        assert_eq!(visible[0].content, "second");
        assert_eq!(visible[1].content, "first");
    }

    #[tokio::test]
    async fn persists_the_full_collection_after_each_capture() {
        let store = MemoryStore::new();
        let mut app = signed_in_app(&store, StubAssist::failing(), SubscriptionPlan::Pro);

        app.create_idea("first", IdeaSource::Typed, Category::Note, Vec::new())
            .await
            .unwrap();
        app.create_idea("second", IdeaSource::Typed, Category::Note, Vec::new())
            .await
            .unwrap();

        let raw = store.load(keys::IDEAS).unwrap().unwrap();
        let stored: Vec<Idea> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].content, "second");
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryStore::new();
        let mut app = signed_in_app(&store, StubAssist::failing(), SubscriptionPlan::Pro);

        let idea = app
            .create_idea("to remove", IdeaSource::Typed, Category::Note, Vec::new())
            .await
            .unwrap()
            .unwrap();

        app.delete_idea(idea.id).unwrap();
        assert!(app.user_ideas().is_empty());

        app.delete_idea(idea.id).unwrap();
        assert!(app.user_ideas().is_empty());
    }

    #[tokio::test]
    async fn toggle_star_flips_and_ignores_missing_ids() {
        let store = MemoryStore::new();
        let mut app = signed_in_app(&store, StubAssist::failing(), SubscriptionPlan::Pro);

        let idea = app
            .create_idea("starrable", IdeaSource::Typed, Category::Note, Vec::new())
            .await
            .unwrap()
            .unwrap();

        app.toggle_star(idea.id).unwrap();
        assert!(app.user_ideas()[0].starred);

        app.toggle_star(idea.id).unwrap();
        assert!(!app.user_ideas()[0].starred);

        app.toggle_star(Uuid::new_v4()).unwrap();
        assert!(!app.user_ideas()[0].starred);
    }

    #[tokio::test]
    async fn update_merges_partial_fields() {
        let store = MemoryStore::new();
        let mut app = signed_in_app(&store, StubAssist::failing(), SubscriptionPlan::Pro);

        let idea = app
            .create_idea("draft", IdeaSource::Typed, Category::Note, Vec::new())
            .await
            .unwrap()
            .unwrap();

        app.update_idea(
            idea.id,
            UpdateIdeaInput {
                content: Some("edited".to_string()),
                category: Some(Category::Project),
                ..Default::default()
            },
        )
        .unwrap();

        let visible = app.user_ideas();
        assert_eq!(visible[0].content, "edited");
        assert_eq!(visible[0].category, Category::Project);
        assert_eq!(visible[0].source, IdeaSource::Typed);
    }

    #[tokio::test(start_paused = true)]
    async fn success_notice_self_clears_after_its_display_duration() {
        let store = MemoryStore::new();
        let mut app = signed_in_app(&store, StubAssist::failing(), SubscriptionPlan::Pro);

        app.create_idea("noted", IdeaSource::Typed, Category::Note, Vec::new())
            .await
            .unwrap();
        assert_eq!(app.notice(), Some("Sync Successful!"));

        tokio::time::advance(NOTICE_TTL + std::time::Duration::from_millis(1)).await;
        assert!(app.notice().is_none());
    }
}

mod deep_search {
    use super::*;

    #[tokio::test]
    async fn free_tier_is_gated_with_no_network_call() {
        let store = MemoryStore::new();
        let assist = StubAssist::with_insights(WebInsights {
            text: "should never be fetched".to_string(),
            sources: Vec::new(),
        });
        let mut app = signed_in_app(&store, assist.clone(), SubscriptionPlan::Free);

        let start = app.deep_search("rockets").await;

        assert_eq!(start, DeepSearchStart::Gated);
        assert_eq!(*app.deep_search_state(), DeepSearchState::Gated);
        assert!(assist.calls().is_empty());
    }

    #[tokio::test]
    async fn pro_tier_receives_results_in_service_order() {
        let store = MemoryStore::new();
        let insights = WebInsights {
            text: "digest".to_string(),
            sources: vec![
                WebResult {
                    title: "B".to_string(),
                    uri: "https://b.example".to_string(),
                    snippet: None,
                },
                WebResult {
                    title: "A".to_string(),
                    uri: "https://a.example".to_string(),
                    snippet: Some("first hit".to_string()),
                },
            ],
        };
        let mut app = signed_in_app(
            &store,
            StubAssist::with_insights(insights.clone()),
            SubscriptionPlan::Pro,
        );

        let start = app.deep_search("rockets").await;

        assert!(matches!(start, DeepSearchStart::Started(_)));
        assert_eq!(app.web_insights(), Some(&insights));
    }

    #[tokio::test]
    async fn failure_renders_the_degraded_payload_like_empty_results() {
        let store = MemoryStore::new();
        let mut app = signed_in_app(&store, StubAssist::failing(), SubscriptionPlan::Pro);

        app.deep_search("rockets").await;

        let insights = app.web_insights().expect("Degraded payload missing");
        assert_eq!(insights.text, DEGRADED_SEARCH_TEXT);
        assert!(insights.sources.is_empty());
        assert!(matches!(app.deep_search_state(), DeepSearchState::Failed(_)));
    }

    #[tokio::test]
    async fn whitespace_query_is_ignored() {
        let store = MemoryStore::new();
        let assist = StubAssist::failing();
        let mut app = signed_in_app(&store, assist.clone(), SubscriptionPlan::Pro);

        let start = app.deep_search("   ").await;

        assert_eq!(start, DeepSearchStart::Ignored);
        assert_eq!(*app.deep_search_state(), DeepSearchState::Idle);
        assert!(assist.calls().is_empty());
    }

    #[tokio::test]
    async fn a_search_in_flight_blocks_re_entry() {
        let store = MemoryStore::new();
        let mut app = signed_in_app(&store, StubAssist::failing(), SubscriptionPlan::Pro);

        let first = app.begin_deep_search("rockets");
        assert!(matches!(first, DeepSearchStart::Started(_)));

        assert_eq!(app.begin_deep_search("rockets"), DeepSearchStart::Ignored);
    }

    #[tokio::test]
    async fn stale_responses_are_discarded_by_the_generation_guard() {
        let store = MemoryStore::new();
        let mut app = signed_in_app(&store, StubAssist::failing(), SubscriptionPlan::Pro);

        let DeepSearchStart::Started(stale) = app.begin_deep_search("rockets") else {
            panic!("Search did not start");
        };

        // The view changes before the response arrives
        app.reset_deep_search();

        app.apply_deep_search(
            stale,
            Ok(WebInsights {
                text: "late reply".to_string(),
                sources: Vec::new(),
            }),
        );

        assert_eq!(*app.deep_search_state(), DeepSearchState::Idle);
        assert!(app.web_insights().is_none());
    }

    #[tokio::test]
    async fn a_new_search_supersedes_the_previous_generation() {
        let store = MemoryStore::new();
        let mut app = signed_in_app(&store, StubAssist::failing(), SubscriptionPlan::Pro);

        let DeepSearchStart::Started(first) = app.begin_deep_search("rockets") else {
            panic!("Search did not start");
        };
        app.apply_deep_search(first, Err(unavailable()));

        let DeepSearchStart::Started(second) = app.begin_deep_search("satellites") else {
            panic!("Search did not restart");
        };
        assert_ne!(first, second);

        // The superseded reply loses the race
        app.apply_deep_search(
            first,
            Ok(WebInsights {
                text: "stale".to_string(),
                sources: Vec::new(),
            }),
        );
        assert_eq!(*app.deep_search_state(), DeepSearchState::Searching);

        app.apply_deep_search(
            second,
            Ok(WebInsights {
                text: "fresh".to_string(),
                sources: Vec::new(),
            }),
        );
        assert_eq!(app.web_insights().map(|i| i.text.as_str()), Some("fresh"));
    }

    #[tokio::test]
    async fn results_are_re_enterable() {
        let store = MemoryStore::new();
        let mut app = signed_in_app(
            &store,
            StubAssist::with_insights(WebInsights {
                text: "digest".to_string(),
                sources: Vec::new(),
            }),
            SubscriptionPlan::Pro,
        );

        app.deep_search("first").await;
        assert!(matches!(app.deep_search_state(), DeepSearchState::Results(_)));

        let start = app.deep_search("second").await;
        assert!(matches!(start, DeepSearchStart::Started(_)));
        assert!(matches!(app.deep_search_state(), DeepSearchState::Results(_)));
    }
}
