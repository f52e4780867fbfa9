//! Integration tests: whole editing sessions
//!
//! These tests drive an `EditorSession` the way the admin editor does:
//!   palette/drag → document store → history
//!                → viewport renderer (preview)
//!                → persistence adapter (save / reload)

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::core::content::content_from;
    use crate::core::{BlockId, Document, EditStatus, SettingsPatch, Viewport};
    use crate::runtime::persistence::{JsonFileStore, MemoryStore, PersistenceAdapter, PersistenceError};
    use crate::runtime::{BlockBounds, DragSource, EditorSession, PageMeta};
    use crate::templates::PageTemplate;

    fn types(document: &Document) -> Vec<String> {
        document.blocks.iter().map(|b| b.block_type.clone()).collect()
    }

    fn inserted(status: EditStatus) -> BlockId {
        match status {
            EditStatus::Inserted(id) => id,
            other => panic!("expected an insert, got {:?}", other),
        }
    }

    /// Runs the reference editing scenario and returns every intermediate
    /// document together with the history length after each step.
    fn run_scenario() -> Vec<(Vec<String>, usize)> {
        let mut session = EditorSession::with_defaults();
        let mut trace = Vec::new();
        let mut record = |session: &EditorSession| {
            trace.push((types(session.document()), session.history().len()));
        };

        inserted(session.insert_block("hero", 0));
        record(&session);
        let text = inserted(session.insert_block("text", 1));
        record(&session);
        assert_eq!(session.move_block(&text, 0), EditStatus::Applied);
        record(&session);

        assert!(session.undo());
        record(&session);
        assert!(session.undo());
        record(&session);
        assert!(session.redo());
        record(&session);
        assert!(session.undo());
        assert!(session.undo());
        record(&session);

        trace
    }

    /// Insert, insert, move, then walk the history.
    ///
    /// Each undo restores the snapshot taken before the matching mutation,
    /// so after undoing the move and the text insert the page holds only
    /// the hero; one more undo reaches the empty page.
    #[test]
    fn test_editing_scenario() {
        let trace = run_scenario();
        let expected: Vec<(Vec<&str>, usize)> = vec![
            (vec!["hero"], 1),
            (vec!["hero", "text"], 2),
            (vec!["text", "hero"], 3),
            (vec!["hero", "text"], 3),
            (vec!["hero"], 3),
            (vec!["hero", "text"], 3),
            (vec![], 3),
        ];
        let actual: Vec<(Vec<&str>, usize)> = trace
            .iter()
            .map(|(order, len)| (order.iter().map(String::as_str).collect(), *len))
            .collect();
        assert_eq!(actual, expected);
    }

    /// Replaying the same actions yields the same intermediate documents
    #[test]
    fn test_scenario_is_deterministic() {
        assert_eq!(run_scenario(), run_scenario());
    }

    /// Undo past the oldest entry and redo past the newest are no-ops
    #[test]
    fn test_history_ends_are_noops() {
        let mut session = EditorSession::with_defaults();
        assert!(!session.undo());
        session.insert_block("text", 0);
        assert!(!session.redo());
        assert!(session.undo());
        assert!(!session.undo());
        assert!(session.document().is_empty());
    }

    /// A mutation after undo discards the redo branch
    #[test]
    fn test_new_edit_discards_redo() {
        let mut session = EditorSession::with_defaults();
        session.insert_block("hero", 0);
        session.insert_block("text", 1);
        assert!(session.undo());
        session.insert_block("divider", 1);

        assert!(!session.can_redo());
        assert!(!session.redo());
        assert_eq!(types(session.document()), vec!["hero", "divider"]);
    }

    /// Hiding a block on mobile removes it from the mobile preview only
    #[test]
    fn test_mobile_visibility() {
        let mut session = EditorSession::with_defaults();
        let hero = inserted(session.insert_block("hero", 0));
        let text = inserted(session.insert_block("text", 1));
        session.update_settings(&text, &SettingsPatch::new().visible_on(Viewport::Mobile, false));

        let mobile = session.render(Viewport::Mobile);
        assert_eq!(mobile.ids(), vec![&hero]);
        assert_eq!(mobile.hidden, vec![text.clone()]);

        for viewport in [Viewport::Desktop, Viewport::Tablet] {
            let pass = session.render(viewport);
            assert_eq!(pass.ids(), vec![&hero, &text]);
            assert!(pass.hidden.is_empty());
        }
        // Hidden blocks stay in the document
        assert_eq!(session.document().len(), 2);
    }

    /// Content edits show up in the next render pass
    #[test]
    fn test_content_edit_reaches_preview() {
        let mut session = EditorSession::with_defaults();
        let hero = inserted(session.insert_block("hero", 0));
        session.update_content(&hero, &content_from(json!({ "title": "Nouvelle collection" })));

        let pass = session.render(Viewport::Desktop);
        let texts = pass.get(&hero).unwrap().body.texts();
        assert!(texts.iter().any(|t| t == "Nouvelle collection"));
    }

    /// Dragging a palette entry between two blocks inserts it there, and
    /// hovering alone never touches the history.
    #[test]
    fn test_palette_drag_between_blocks() {
        let mut session = EditorSession::with_defaults();
        let first = inserted(session.insert_block("hero", 0));
        let second = inserted(session.insert_block("text", 1));
        let history = session.history().len();

        let bounds = [
            BlockBounds::new(first.clone(), 0.0, 100.0),
            BlockBounds::new(second.clone(), 100.0, 100.0),
        ];
        session.start_drag(DragSource::PaletteTemplate("divider".into()), 0.0, 0.0);
        assert_eq!(session.drag_over(10.0, 60.0, &bounds), Some(1));
        assert_eq!(session.drag_over(10.0, 80.0, &bounds), Some(1));
        assert_eq!(session.history().len(), history);

        let divider = inserted(session.drop());
        assert_eq!(types(session.document()), vec!["hero", "divider", "text"]);
        assert_eq!(session.history().len(), history + 1);
        assert_eq!(session.selection().block(), Some(&divider));
    }

    /// Dragging on the mobile canvas, where the hero is hidden, still lands
    /// the block where the pointer shows it
    #[test]
    fn test_drag_on_viewport_with_hidden_block() {
        let mut session = EditorSession::with_defaults();
        let hero = inserted(session.insert_block("hero", 0));
        let text = inserted(session.insert_block("text", 1));
        let quote = inserted(session.insert_block("quote", 2));
        session.update_settings(&hero, &SettingsPatch::new().visible_on(Viewport::Mobile, false));

        let mobile = session.render(Viewport::Mobile);
        let bounds: Vec<BlockBounds> = mobile
            .ids()
            .into_iter()
            .enumerate()
            .map(|(i, id)| BlockBounds::new(id.clone(), i as f64 * 100.0, 100.0))
            .collect();
        assert_eq!(bounds.len(), 2);

        session.start_drag(DragSource::ExistingBlock(text.clone()), 0.0, 50.0);
        assert_eq!(session.drag_over(0.0, 190.0, &bounds), Some(2));
        assert_eq!(session.drop(), EditStatus::Applied);
        assert_eq!(session.document().top_level_ids(), vec![hero.clone(), quote.clone(), text.clone()]);

        // Above the first visible block means right after the hidden hero
        session.start_drag(DragSource::PaletteTemplate("divider".into()), 0.0, 0.0);
        let bounds: Vec<BlockBounds> = session
            .render(Viewport::Mobile)
            .ids()
            .into_iter()
            .enumerate()
            .map(|(i, id)| BlockBounds::new(id.clone(), i as f64 * 100.0, 100.0))
            .collect();
        assert_eq!(session.drag_over(0.0, 10.0, &bounds), Some(0));
        inserted(session.drop());
        assert_eq!(types(session.document()), vec!["hero", "divider", "quote", "text"]);
    }

    /// Saves are coalesced while one is in flight; edits made during the
    /// save keep the session dirty once it completes.
    #[tokio::test]
    async fn test_save_coalesces_and_tracks_dirty() {
        let store = MemoryStore::new();
        let mut session = EditorSession::with_defaults();
        session.insert_block("hero", 0);
        assert!(session.is_dirty());

        let (ticket, payload) = session.request_save(false).unwrap();
        assert!(session.is_saving());
        assert!(session.request_save(false).is_none());

        // Editing continues while the save runs
        session.insert_block("text", 1);

        let result = store.save(&payload).await;
        session.complete_save(ticket, result).unwrap();
        assert!(!session.is_saving());
        assert!(session.is_dirty());
        assert_eq!(store.saves()[0].content.blocks.len(), 1);

        let revision = session.save(&store, true).await.unwrap();
        assert_eq!(revision, Some(session.revision()));
        assert!(!session.is_dirty());
        assert_eq!(store.save_count(), 2);
        assert!(store.saves()[1].publish);
    }

    /// A failed save keeps every edit and the dirty flag
    #[tokio::test]
    async fn test_failed_save_preserves_edits() {
        let store = MemoryStore::new();
        let mut session = EditorSession::with_defaults();
        session.insert_block("hero", 0);
        session.insert_block("faq", 1);
        let before = session.document().clone();

        store.fail_next(PersistenceError::Rejected {
            status: 503,
            message: "maintenance".into(),
        });
        let err = session.save(&store, false).await.unwrap_err();
        assert!(err.is_retryable());

        assert_eq!(session.document(), &before);
        assert!(session.is_dirty());
        assert!(!session.is_saving());
        assert!(session.last_save_error().unwrap().contains("maintenance"));
        assert_eq!(session.history().len(), 2);

        session.save(&store, false).await.unwrap();
        assert!(!session.is_dirty());
        assert!(session.last_save_error().is_none());
        assert_eq!(store.save_count(), 1);
    }

    /// Save to a JSON file, load it into a fresh session, get the same page
    #[tokio::test]
    async fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("page.json"));
        assert!(store.load().await.unwrap().is_none());

        let mut session = EditorSession::with_defaults();
        let hero = inserted(session.insert_block("hero", 0));
        session.update_settings(&hero, &SettingsPatch::new().padding_top(24.0));
        session.set_meta_title(Some("Accueil".into()));
        session.save(&store, false).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(&loaded, session.document());

        let mut reopened = EditorSession::with_defaults();
        reopened.load(loaded, PageMeta::default());
        assert!(!reopened.is_dirty());
        assert!(!reopened.can_undo());
        assert_eq!(reopened.document().blocks[0].resolved_settings().padding.top, 24.0);
    }

    /// Every starter template loads into a session and renders without
    /// falling back to a placeholder.
    #[test]
    fn test_templates_render() {
        for template in PageTemplate::ALL {
            let mut session = EditorSession::with_defaults();
            session.load(template.instantiate(), PageMeta::default());

            let pass = session.render(Viewport::Desktop);
            assert_eq!(pass.fallbacks, 0, "{} fell back", template.key());
            assert_eq!(pass.blocks.len(), session.document().len());
        }
    }
}
