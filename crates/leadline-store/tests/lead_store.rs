use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use leadline_core::domain::{
    FollowupKind, FollowupPriority, FollowupSchedule, Lead, LeadDraft, LeadId, PaymentFrequency,
    Position, Stage,
};
use leadline_core::followup::compose;
use leadline_core::ValidationError;
use leadline_store::{
    LeadBackend, LeadStore, LeadStoreError, PersistenceError, SqliteBackend, Store,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::Notify;

/// Keeps leads in a vector; can be told to fail or to hold the next list
/// call until released.
#[derive(Default)]
struct MemoryBackend {
    leads: Mutex<Vec<Lead>>,
    failing: AtomicBool,
    calls: AtomicUsize,
    gated: AtomicBool,
    gate: Notify,
}

impl MemoryBackend {
    fn check(&self) -> Result<(), PersistenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(PersistenceError::Unavailable("backend offline".to_string()));
        }
        Ok(())
    }

    fn stored(&self) -> Vec<Lead> {
        self.leads.lock().unwrap().clone()
    }
}

#[async_trait]
impl LeadBackend for MemoryBackend {
    async fn list_leads(&self) -> Result<Vec<Lead>, PersistenceError> {
        if self.gated.load(Ordering::SeqCst) {
            self.gate.notified().await;
        }
        self.check()?;
        Ok(self.stored())
    }

    async fn create_lead(&self, lead: Lead) -> Result<Lead, PersistenceError> {
        self.check()?;
        self.leads.lock().unwrap().push(lead.clone());
        Ok(lead)
    }

    async fn update_lead(&self, lead: Lead) -> Result<Lead, PersistenceError> {
        self.check()?;
        let mut leads = self.leads.lock().unwrap();
        if let Some(slot) = leads.iter_mut().find(|slot| slot.id == lead.id) {
            *slot = lead.clone();
        }
        Ok(lead)
    }

    async fn delete_lead(&self, id: LeadId) -> Result<(), PersistenceError> {
        self.check()?;
        self.leads.lock().unwrap().retain(|lead| lead.id != id);
        Ok(())
    }

    async fn search_leads(&self, term: &str) -> Result<Vec<Lead>, PersistenceError> {
        self.check()?;
        let needle = term.to_lowercase();
        Ok(self
            .stored()
            .into_iter()
            .filter(|lead| lead.business_name.to_lowercase().contains(&needle))
            .collect())
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 7, 15, 0, 0).unwrap()
}

fn draft(business: &str) -> LeadDraft {
    LeadDraft {
        business_name: business.to_string(),
        owner_name: "Maria Lopez".to_string(),
        phone: "(415) 555-1212".to_string(),
        ..LeadDraft::default()
    }
}

#[tokio::test]
async fn creates_in_the_same_instant_get_distinct_ordered_stamps() {
    let store = LeadStore::new(MemoryBackend::default());
    let first = store.create(now(), draft("Acme Roofing")).await.unwrap();
    let second = store.create(now(), draft("Zeta Plumbing")).await.unwrap();

    assert_ne!(first.id, second.id);
    assert!(first.created_at < second.created_at);
    let names: Vec<_> = store
        .leads()
        .into_iter()
        .map(|lead| lead.business_name)
        .collect();
    assert_eq!(names, vec!["Acme Roofing", "Zeta Plumbing"]);

    let updated = store.update(now(), first.clone()).await.unwrap();
    assert_eq!(updated.created_at, first.created_at);
    assert!(updated.updated_at > second.created_at);
}

#[tokio::test]
async fn created_lead_reads_back_as_draft_plus_id_and_stamps() {
    let store = LeadStore::new(MemoryBackend::default());
    let draft = LeadDraft {
        email: Some("maria@sunrise.com".to_string()),
        funding_amount: 75_000,
        monthly_revenue: 40_000,
        stage: Stage::EmailSent,
        next_followup: compose("2025-03-10", "14:30").unwrap(),
        followup_priority: FollowupPriority::High,
        followup_notes: Some("bring offer".to_string()),
        client_timezone: "America/Chicago".to_string(),
        current_positions: vec![Position::new(
            "Kapitus",
            25_000,
            12_000,
            PaymentFrequency::Weekly,
        )],
        ..draft("Sunrise Bakery")
    };

    let created = store.create(now(), draft.clone()).await.unwrap();
    assert_eq!(created.created_at, created.updated_at);

    let fetched = store.get_by_id(created.id).expect("created lead");
    assert_eq!(fetched, Lead::from_draft(created.id, created.created_at, draft));
    assert_eq!(store.backend().stored(), vec![fetched]);
}

#[tokio::test]
async fn failed_calls_leave_the_list_untouched() {
    let store = LeadStore::new(MemoryBackend::default());
    let lead = store.create(now(), draft("Sunrise Bakery")).await.unwrap();
    let before = store.leads();

    store.backend().failing.store(true, Ordering::SeqCst);

    let mut changed = lead.clone();
    changed.stage = Stage::Closed;
    let err = store.update(now(), changed).await.unwrap_err();
    assert!(matches!(err, LeadStoreError::Persistence(_)));
    assert_eq!(store.leads(), before);
    assert_eq!(store.last_error().as_deref(), Some("persistence unavailable: backend offline"));

    let err = store.delete(lead.id).await.unwrap_err();
    assert!(matches!(err, LeadStoreError::Persistence(_)));
    assert_eq!(store.leads(), before);

    let err = store.create(now(), draft("Harbor Auto")).await.unwrap_err();
    assert!(matches!(err, LeadStoreError::Persistence(_)));
    assert_eq!(store.leads(), before);
    assert!(!store.is_loading());

    store.backend().failing.store(false, Ordering::SeqCst);
    store.load_all().await.unwrap();
    assert!(store.last_error().is_none());
    assert_eq!(store.leads(), before);
}

#[tokio::test]
async fn unknown_ids_fail_before_any_backend_call() {
    let store = LeadStore::new(MemoryBackend::default());
    let stranger = Lead::from_draft(LeadId::new(), now(), draft("Ghost Co"));

    let err = store.update(now(), stranger.clone()).await.unwrap_err();
    assert!(matches!(err, LeadStoreError::NotFound(id) if id == stranger.id));
    let err = store.delete(stranger.id).await.unwrap_err();
    assert!(matches!(err, LeadStoreError::NotFound(_)));
    assert_eq!(store.backend().calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn invalid_drafts_never_reach_the_backend() {
    let store = LeadStore::new(MemoryBackend::default());
    let mut bad = draft("Sunrise Bakery");
    bad.phone = "555".to_string();

    let err = store.create(now(), bad).await.unwrap_err();
    assert!(matches!(
        err,
        LeadStoreError::Validation(ValidationError::InvalidPhone(_))
    ));

    let mut past = draft("Sunrise Bakery");
    past.next_followup = compose("2025-03-06", "09:00").unwrap();
    let err = store.create(now(), past).await.unwrap_err();
    assert!(matches!(
        err,
        LeadStoreError::Validation(ValidationError::FollowupInPast(_))
    ));
    assert_eq!(store.backend().calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn blank_search_returns_current_list_without_backend() {
    let store = LeadStore::new(MemoryBackend::default());
    store.create(now(), draft("Sunrise Bakery")).await.unwrap();
    store.create(now(), draft("Harbor Auto")).await.unwrap();
    let calls = store.backend().calls.load(Ordering::SeqCst);

    let all = store.search("  ").await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(store.backend().calls.load(Ordering::SeqCst), calls);

    let found = store.search("harbor").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].business_name, "Harbor Auto");
}

#[tokio::test(flavor = "current_thread")]
async fn loading_is_set_while_a_call_is_pending() {
    let backend = MemoryBackend::default();
    backend.gated.store(true, Ordering::SeqCst);
    let store = LeadStore::new(backend);
    assert!(!store.is_loading());

    let (loaded, ()) = tokio::join!(store.load_all(), async {
        while !store.is_loading() {
            tokio::task::yield_now().await;
        }
        store.backend().gate.notify_one();
    });
    assert_eq!(loaded.unwrap(), 0);
    assert!(!store.is_loading());
}

#[tokio::test]
async fn workflows_append_notes_and_persist() {
    let store = LeadStore::new(MemoryBackend::default());
    let mut input = draft("Sunrise Bakery");
    input.client_timezone = "America/Chicago".to_string();
    let lead = store.create(now(), input).await.unwrap();

    let staged = store
        .modify(now(), lead.id, |lead| {
            lead.change_stage(Stage::EmailSent, now());
            Ok(())
        })
        .await
        .unwrap();
    assert_eq!(staged.stage, Stage::EmailSent);
    assert_eq!(staged.internal_notes, "[3/7/2025] Stage updated to: Email Sent");

    let at = compose("2025-03-10", "14:30").unwrap().unwrap();
    let scheduled = store
        .modify(now(), lead.id, |lead| {
            lead.schedule_followup(
                FollowupSchedule {
                    at,
                    kind: FollowupKind::Call,
                    priority: FollowupPriority::High,
                    notes: Some("bring offer".to_string()),
                },
                now(),
            )
        })
        .await
        .unwrap();
    assert_eq!(scheduled.next_followup, Some(at));
    assert_eq!(scheduled.followup_priority, FollowupPriority::High);

    let stored = store.backend().stored();
    assert_eq!(stored[0], scheduled);
    assert_eq!(store.get_by_id(lead.id), Some(scheduled));
}

#[tokio::test]
async fn past_followup_is_rejected_only_when_changed() {
    let store = LeadStore::new(MemoryBackend::default());
    let mut input = draft("Sunrise Bakery");
    input.next_followup = compose("2025-03-08", "09:00").unwrap();
    let lead = store.create(now(), input).await.unwrap();

    // A week later the stored follow-up is in the past but untouched.
    let later = Utc.with_ymd_and_hms(2025, 3, 14, 15, 0, 0).unwrap();
    let mut renamed = lead.clone();
    renamed.business_name = "Sunrise Bakery & Cafe".to_string();
    store.update(later, renamed).await.unwrap();

    let mut moved = store.get_by_id(lead.id).unwrap();
    moved.next_followup = compose("2025-03-13", "09:00").unwrap();
    let err = store.update(later, moved).await.unwrap_err();
    assert!(matches!(
        err,
        LeadStoreError::Validation(ValidationError::FollowupInPast(_))
    ));
}

#[tokio::test]
async fn sqlite_backend_deletes_positions_with_the_lead() {
    let sqlite = Store::open_in_memory().expect("open in memory");
    sqlite.migrate().expect("migrate");
    let store = LeadStore::new(SqliteBackend::new(sqlite));

    let mut input = draft("Harbor Auto");
    input.current_positions = vec![
        Position::new("Kapitus", 25_000, 12_000, PaymentFrequency::Weekly),
        Position::new("OnDeck", 10_000, 4_000, PaymentFrequency::Daily),
    ];
    let lead = store.create(now(), input).await.unwrap();
    let count = store
        .backend()
        .with_store(|s| s.leads().count_positions(lead.id))
        .await
        .unwrap();
    assert_eq!(count, 2);

    store.delete(lead.id).await.unwrap();
    assert!(store.leads().is_empty());
    let count = store
        .backend()
        .with_store(|s| s.leads().count_positions(lead.id))
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn sqlite_reload_matches_in_memory_order() {
    let sqlite = Store::open_in_memory().expect("open in memory");
    sqlite.migrate().expect("migrate");
    let store = LeadStore::new(SqliteBackend::new(sqlite));

    store.create(now(), draft("Zeta Plumbing")).await.unwrap();
    store.create(now(), draft("Acme Roofing")).await.unwrap();
    let before = store.leads();

    store.load_all().await.unwrap();
    assert_eq!(store.leads(), before);
}
