//! State-machine tests driving sessions through scripted seams.

use super::*;
use crate::constants::DEFAULT_LANGUAGE;
use crate::draft::MemoryDraftStore;
use crate::editor::BufferEditor;
use crate::error::TransportError;
use crate::language::LanguageSource;
use crate::location::HistoryNavigator;
use crate::protocol::Response;
use crate::test_support::{Exchange, ScriptedTransport};

const ORIGIN: &str = "https://example.test";

type TestSession = Session<BufferEditor, MemoryDraftStore>;

fn new_session(drafts: MemoryDraftStore) -> (TestSession, HistoryNavigator) {
    let session = Session::open(&PageLocation::root(), BufferEditor::default(), drafts);
    (session, HistoryNavigator::new(ORIGIN, "/"))
}

fn viewing_session(path: &str, hint: Option<&str>) -> (TestSession, HistoryNavigator) {
    let location = PageLocation::new(path).with_language_hint(hint.map(ToString::to_string));
    let session = Session::open(&location, BufferEditor::default(), MemoryDraftStore::new());
    (session, HistoryNavigator::new(ORIGIN, path))
}

fn answer(value: Option<&str>) -> impl FnMut(&str) -> Option<String> {
    let value = value.map(ToString::to_string);
    move |_message: &str| value.clone()
}

#[test]
fn new_session_restores_draft_content_and_language() {
    let drafts = MemoryDraftStore::with_draft(Draft::new("let x = 1;", Some("rust".into())));
    let (session, _) = new_session(drafts);

    assert_eq!(session.mode(), Mode::New);
    assert_eq!(session.path(), "/");
    assert!(!session.editor().is_read_only());
    assert_eq!(session.content(), "let x = 1;");
    assert_eq!(session.language(), "rust");
    assert_eq!(session.resolution().source, LanguageSource::Draft);
    assert_eq!(session.pending_fetch(), None);
    assert_eq!(session.status(), "Ln 1, Col 1");
}

#[test]
fn new_session_without_draft_starts_empty_in_default_language() {
    let (session, _) = new_session(MemoryDraftStore::new());
    assert_eq!(session.content(), "");
    assert_eq!(session.language(), DEFAULT_LANGUAGE);
    assert_eq!(session.resolution().source, LanguageSource::Default);
}

#[test]
fn new_session_ignores_unrecognized_draft_language() {
    let drafts = MemoryDraftStore::with_draft(Draft::new("x", Some("klingon".into())));
    let (session, _) = new_session(drafts);
    assert_eq!(session.language(), DEFAULT_LANGUAGE);
}

#[test]
fn viewing_session_prefers_extension_over_header() {
    let (session, _) = viewing_session("/foo.rs", Some("go"));

    assert_eq!(session.mode(), Mode::Viewing);
    assert!(session.editor().is_read_only());
    assert_eq!(session.language(), "rust");
    assert_eq!(session.content(), LOADING_PLACEHOLDER);
    assert_eq!(session.pending_fetch(), Some("/foo"));
}

#[test]
fn viewing_session_falls_back_to_header_hint() {
    let (session, _) = viewing_session("/foo", Some("go"));
    assert_eq!(session.language(), "go");
    assert_eq!(session.resolution().source, LanguageSource::Header);
    assert_eq!(session.pending_fetch(), Some("/foo"));
}

#[test]
fn viewing_session_keeps_default_for_unknown_extension() {
    let (session, _) = viewing_session("/archive.zzz", Some("go"));
    assert_eq!(session.resolution().source, LanguageSource::Extension);
    assert_eq!(session.language(), DEFAULT_LANGUAGE);
}

#[tokio::test]
async fn load_remote_replaces_placeholder() {
    let (mut session, _) = viewing_session("/abc.py", None);
    let transport = ScriptedTransport::new().with_fetch(Response::new(200, "print('hi')\n"));

    session.load_remote(&transport).await.expect("fetch");

    assert_eq!(session.content(), "print('hi')\n");
    assert_eq!(session.pending_fetch(), None);
    assert_eq!(
        transport.exchanges(),
        vec![Exchange::Fetch {
            path: "/abc".to_string()
        }]
    );

    session.load_remote(&transport).await.expect("no pending fetch");
    assert_eq!(transport.exchanges().len(), 1);
}

#[tokio::test]
async fn load_remote_failure_is_appended_not_thrown_away() {
    let (mut session, _) = viewing_session("/abc", None);
    let transport =
        ScriptedTransport::new().with_fetch_error(TransportError::new("connection reset"));

    let err = session.load_remote(&transport).await.expect_err("fetch fails");

    assert_eq!(err.to_string(), "connection reset");
    assert_eq!(
        session.content(),
        format!("{}\n// Error: connection reset", LOADING_PLACEHOLDER)
    );
    assert_eq!(session.mode(), Mode::Viewing);
}

#[test]
fn content_changes_persist_only_while_new() {
    let (mut session, _) = new_session(MemoryDraftStore::new());
    assert!(session.editor_mut().insert("draft text"));
    session.on_content_changed();
    assert_eq!(
        session.drafts().load(),
        Some(Draft::new("draft text", Some(DEFAULT_LANGUAGE.to_string())))
    );

    let (mut viewing, _) = viewing_session("/abc", None);
    viewing.on_content_changed();
    assert_eq!(viewing.drafts().load(), None);
    assert!(!viewing.replace_content("nope"));
    assert_eq!(viewing.drafts().writes(), 0);
}

#[tokio::test]
async fn successful_submit_clears_draft_and_freezes_at_new_path() {
    let (mut session, mut nav) = new_session(MemoryDraftStore::new());
    assert!(session.replace_content("hello"));
    let transport = ScriptedTransport::new().with_create(Response::new(200, "xyz 5"));

    let created = session
        .submit(&transport, &mut nav)
        .await
        .expect("submit")
        .expect("created while new");

    assert_eq!(created.id, "xyz");
    assert_eq!(created.bytes, 5);
    assert_eq!(session.drafts().load(), None);
    assert_eq!(session.mode(), Mode::Viewing);
    assert_eq!(session.path(), "/xyz");
    assert!(session.editor().is_read_only());
    assert_eq!(nav.path(), "/xyz");
    assert_eq!(nav.page_loads(), 2);
    assert_eq!(
        transport.exchanges(),
        vec![Exchange::Create {
            body: b"hello".to_vec(),
            language: Some(DEFAULT_LANGUAGE.to_string()),
        }]
    );
}

#[tokio::test]
async fn conflict_is_shown_inline_and_session_stays_editable() {
    let (mut session, mut nav) = new_session(MemoryDraftStore::new());
    session.replace_content("dup");
    let transport = ScriptedTransport::new()
        .with_create(Response::new(409, "File already exists: abc123"));

    let err = session
        .submit(&transport, &mut nav)
        .await
        .expect_err("conflict");

    assert!(matches!(err, SubmitError::Rejected { status: 409, .. }));
    assert_eq!(
        session.content(),
        "dup\n// Error: File already exists at https://example.test/abc123"
    );
    assert_eq!(session.mode(), Mode::New);
    assert!(!session.editor().is_read_only());
    assert_eq!(nav.page_loads(), 1);
    assert_eq!(nav.path(), "/");
    assert_eq!(
        session.drafts().load().map(|draft| draft.content),
        Some("dup".to_string())
    );
}

#[tokio::test]
async fn transport_failure_is_appended_verbatim() {
    let (mut session, mut nav) = new_session(MemoryDraftStore::new());
    session.replace_content("body");
    let transport =
        ScriptedTransport::new().with_create_error(TransportError::new("timed out"));

    session
        .submit(&transport, &mut nav)
        .await
        .expect_err("transport failure");

    assert_eq!(session.content(), "body\n// Error: timed out");
    assert_eq!(session.mode(), Mode::New);
}

#[tokio::test]
async fn submit_while_viewing_sends_nothing() {
    let (mut session, mut nav) = viewing_session("/abc", None);
    let transport = ScriptedTransport::new();

    let outcome = session.submit(&transport, &mut nav).await.expect("no-op");

    assert_eq!(outcome, None);
    assert!(transport.exchanges().is_empty());
    assert_eq!(session.mode(), Mode::Viewing);
    assert_eq!(nav.page_loads(), 1);
}

#[tokio::test]
async fn fork_is_idempotent_and_keeps_content() {
    let (mut session, mut nav) = viewing_session("/abc.rs", None);
    let transport = ScriptedTransport::new().with_fetch(Response::new(200, "fn main() {}"));
    session.load_remote(&transport).await.expect("fetch");

    session.fork(&mut nav);
    let once = (
        session.mode(),
        session.path().to_string(),
        session.editor().is_read_only(),
        session.content(),
    );
    session.fork(&mut nav);
    let twice = (
        session.mode(),
        session.path().to_string(),
        session.editor().is_read_only(),
        session.content(),
    );

    assert_eq!(once, twice);
    assert_eq!(
        once,
        (Mode::New, "/".to_string(), false, "fn main() {}".to_string())
    );
    assert_eq!(session.language(), "rust");
    assert_eq!(nav.path(), "/");
    assert_eq!(nav.page_loads(), 1);
    assert_eq!(session.drafts().load(), None);

    assert!(session.editor_mut().insert("// forked\n"));
    session.on_content_changed();
    assert_eq!(
        session.drafts().load(),
        Some(Draft::new("// forked\nfn main() {}", Some("rust".to_string())))
    );
}

#[test]
fn fork_drops_a_pending_fetch() {
    let (mut session, mut nav) = viewing_session("/abc", None);
    session.fork(&mut nav);
    assert_eq!(session.pending_fetch(), None);
    assert_eq!(session.content(), LOADING_PLACEHOLDER);
}

#[test]
fn fork_while_new_is_a_no_op() {
    let (mut session, mut nav) = new_session(MemoryDraftStore::new());
    session.fork(&mut nav);
    assert_eq!(nav.history(), ["/"]);
}

#[test]
fn language_override_applies_and_persists_recognized_languages() {
    let (mut session, _) = new_session(MemoryDraftStore::new());

    assert!(session.override_language(&mut answer(Some("py"))));
    assert_eq!(session.language(), "python");
    assert_eq!(
        session.drafts().load(),
        Some(Draft::new("", Some("python".to_string())))
    );

    assert!(!session.override_language(&mut answer(Some("klingon"))));
    assert!(!session.override_language(&mut answer(Some("   "))));
    assert!(!session.override_language(&mut answer(None)));
    assert_eq!(session.language(), "python");
    assert_eq!(session.drafts().writes(), 1);
}

#[test]
fn language_override_works_while_viewing() {
    let (mut session, _) = viewing_session("/abc", Some("go"));
    assert!(session.set_language_override("rust"));
    assert_eq!(session.language(), "rust");
    assert_eq!(
        session.drafts().load().and_then(|draft| draft.language),
        Some("rust".to_string())
    );
}

#[test]
fn goto_line_moves_cursor_and_updates_status() {
    let drafts = MemoryDraftStore::with_draft(Draft::new("a\nb\nc\n", None));
    let (mut session, _) = new_session(drafts);

    assert_eq!(
        session.goto_line(&mut answer(Some("2"))),
        Some(CursorPosition::new(2, 1))
    );
    assert_eq!(session.status(), "Ln 2, Col 1");

    assert_eq!(
        session.goto_line(&mut answer(Some("99"))),
        Some(CursorPosition::new(4, 1))
    );
    assert_eq!(session.goto_line(&mut answer(Some("two"))), None);
    assert_eq!(session.goto_line(&mut answer(Some("0"))), None);
    assert_eq!(session.status(), "Ln 4, Col 1");
}

#[test]
fn cursor_moves_only_touch_status() {
    let (mut session, _) = new_session(MemoryDraftStore::new());
    session.on_cursor_moved(CursorPosition::new(12, 5));
    assert_eq!(session.status(), "Ln 12, Col 5");
    assert_eq!(session.drafts().writes(), 0);
}

#[tokio::test]
async fn perform_dispatches_actions_with_mode_guards() {
    let (mut session, mut nav) = viewing_session("/abc", None);
    let transport = ScriptedTransport::new().with_create(Response::new(200, "n3w 4"));
    let mut prompt = answer(Some("toml"));

    session
        .perform(Action::Submit, &transport, &mut nav, &mut prompt)
        .await
        .expect("viewing submit is a no-op");
    assert!(transport.exchanges().is_empty());

    session
        .perform(Action::Fork, &transport, &mut nav, &mut prompt)
        .await
        .expect("fork");
    session
        .perform(Action::SetLanguage, &transport, &mut nav, &mut prompt)
        .await
        .expect("set language");
    assert_eq!(session.language(), "toml");

    session.replace_content("a = 1");
    session
        .perform(Action::Submit, &transport, &mut nav, &mut prompt)
        .await
        .expect("submit");
    assert_eq!(session.path(), "/n3w");
    assert_eq!(session.mode(), Mode::Viewing);
}
