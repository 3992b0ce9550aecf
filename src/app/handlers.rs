//! Key handlers.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    events::Screen,
    input::{InputBoxState, InputCallbackId},
    shortcuts,
    status::{ResourceLevel, status_line},
    worker::WorkerCmd,
};

use super::{App, retry_report, submit_report};

/// Handle one key press; returns true when the app should exit.
pub async fn handle_key(app: &mut App, k: KeyEvent) -> Result<bool> {
    // Popups take input before the screen underneath.
    if app.input_box.is_some() {
        return handle_input_box_key(app, k).await;
    }
    if app.dialog.is_some() {
        return handle_dialog_key(app, k).await;
    }

    match app.ui.screen {
        Screen::Form => handle_form_key(app, k).await,
        Screen::Settings => handle_settings_key(app, k).await,
    }
}

/// True for Ctrl+C.
pub fn is_ctrl_c(k: &KeyEvent) -> bool {
    k.modifiers.contains(KeyModifiers::CONTROL) && k.code == KeyCode::Char('c')
}

/// Reporting form keys.
async fn handle_form_key(app: &mut App, k: KeyEvent) -> Result<bool> {
    let sc = &app.shortcuts.form;
    let step = i32::from(app.cfg.form.step.max(1));
    let coarse = i32::from(app.cfg.form.coarse_step.max(1));

    if shortcuts::matches_shortcut(&k, &sc.quit) {
        return Ok(true);
    } else if shortcuts::matches_shortcut(&k, &sc.settings) {
        // Settings edit copies of the saved values.
        reload_settings_buffers(app);
        app.ui.screen = Screen::Settings;
        app.ui.status = "Settings".into();
    } else if shortcuts::matches_shortcut(&k, &sc.submit) {
        submit_report(app).await?;
    } else if shortcuts::matches_shortcut(&k, &sc.up) {
        // Focus wraps around at both ends.
        app.form.select_prev();
    } else if shortcuts::matches_shortcut(&k, &sc.down) {
        app.form.select_next();
    } else if shortcuts::matches_shortcut(&k, &sc.decrease) {
        // Saturates at 0 and 100.
        move_slider(app, -step);
    } else if shortcuts::matches_shortcut(&k, &sc.increase) {
        move_slider(app, step);
    } else if shortcuts::matches_shortcut(&k, &sc.decrease_coarse) {
        move_slider(app, -coarse);
    } else if shortcuts::matches_shortcut(&k, &sc.increase_coarse) {
        move_slider(app, coarse);
    } else if shortcuts::matches_shortcut(&k, &sc.min) {
        set_slider(app, ResourceLevel::MIN);
    } else if shortcuts::matches_shortcut(&k, &sc.max) {
        set_slider(app, ResourceLevel::MAX);
    } else if shortcuts::matches_shortcut(&k, &sc.edit_value) {
        // Prefill with the current value; the callback clamps what comes back.
        let kind = app.form.selected_kind();
        app.input_box = Some(InputBoxState::new(
            format!("{} (0-100):", kind.title()),
            app.form.level(kind).percent().to_string(),
            InputCallbackId::SliderValue(kind),
        ));
    }

    Ok(false)
}

/// Nudge the focused slider.
fn move_slider(app: &mut App, delta: i32) {
    let level = app.form.adjust_selected(delta);
    tracing::debug!("{}", status_line(app.form.selected_kind(), level));
}

/// Jump the focused slider to `level`.
fn set_slider(app: &mut App, level: ResourceLevel) {
    let kind = app.form.selected_kind();
    app.form.set(kind, level);
    tracing::debug!("{}", status_line(kind, level));
}

/// Settings screen keys.
async fn handle_settings_key(app: &mut App, k: KeyEvent) -> Result<bool> {
    let sc = &app.shortcuts.settings;

    if shortcuts::matches_shortcut(&k, &sc.cancel) {
        // Drop edits and go back.
        reload_settings_buffers(app);
        app.ui.screen = Screen::Form;
        app.ui.status = "Ready".into();
    } else if shortcuts::matches_shortcut(&k, &sc.save) {
        app.cfg.backend.base_url = app.base_url.trim().to_string();
        app.cfg.backend.shelter_id = app.shelter_id.trim().to_string();
        app.cfg.backend.auth_token = app.auth_token.trim().to_string();
        app.cfg.save(&app.cfg_path)?;
        tracing::info!("settings saved to {}", app.cfg_path.display());

        app.worker_tx
            .send(WorkerCmd::SaveSettings(app.cfg.clone()))
            .await?;
        app.ui.screen = Screen::Form;
        app.ui.status = "Saved settings".into();
    } else if shortcuts::matches_shortcut(&k, &sc.base_url) {
        app.input_box = Some(InputBoxState::new(
            "Backend base URL (empty = local only):",
            app.base_url.clone(),
            InputCallbackId::SettingsBaseUrl,
        ));
    } else if shortcuts::matches_shortcut(&k, &sc.shelter_id) {
        app.input_box = Some(InputBoxState::new(
            "Shelter ID:",
            app.shelter_id.clone(),
            InputCallbackId::SettingsShelterId,
        ));
    } else if shortcuts::matches_shortcut(&k, &sc.auth_token) {
        app.input_box = Some(
            InputBoxState::new(
                "Auth token:",
                app.auth_token.clone(),
                InputCallbackId::SettingsAuthToken,
            )
            .masked(),
        );
    }

    Ok(false)
}

/// Dialog keys.
async fn handle_dialog_key(app: &mut App, k: KeyEvent) -> Result<bool> {
    let Some(dialog) = &app.dialog else {
        return Ok(false);
    };
    let sc = &app.shortcuts.dialog;

    if dialog.can_retry() && shortcuts::matches_shortcut(&k, &sc.retry) {
        retry_report(app).await?;
    } else if shortcuts::matches_shortcut(&k, &sc.confirm)
        || shortcuts::matches_shortcut(&k, &sc.dismiss)
    {
        if dialog.can_retry() {
            // Giving up on a failed report discards it.
            tracing::warn!("failed status update dismissed");
            app.pending = None;
            app.ui.status = "Status update not sent".into();
        }
        app.dialog = None;
    }

    Ok(false)
}

/// InputBox keys.
async fn handle_input_box_key(app: &mut App, k: KeyEvent) -> Result<bool> {
    let Some(input_state) = &mut app.input_box else {
        return Ok(false);
    };
    let sc = &app.shortcuts.input_box;

    if shortcuts::matches_shortcut(&k, &sc.confirm) {
        let value = input_state.value.clone();
        let callback_id = input_state.callback_id.clone();
        app.input_box = None;
        apply_input_callback(app, callback_id, value);
    } else if shortcuts::matches_shortcut(&k, &sc.cancel) {
        app.input_box = None;
    } else if shortcuts::matches_shortcut(&k, &sc.backspace) {
        input_state.backspace();
    } else if shortcuts::matches_shortcut(&k, &sc.delete) {
        input_state.delete();
    } else if shortcuts::matches_shortcut(&k, &sc.left) {
        input_state.move_left();
    } else if shortcuts::matches_shortcut(&k, &sc.right) {
        input_state.move_right();
    } else if shortcuts::matches_shortcut(&k, &sc.home) {
        input_state.move_home();
    } else if shortcuts::matches_shortcut(&k, &sc.end) {
        input_state.move_end();
    } else if shortcuts::matches_shortcut(&k, &sc.clear_line) {
        input_state.clear_line();
    } else if let KeyCode::Char(c) = k.code
        && !k.modifiers.contains(KeyModifiers::CONTROL)
    {
        input_state.insert_char(c);
    }

    Ok(false)
}

/// Store a confirmed InputBox value.
fn apply_input_callback(app: &mut App, callback_id: InputCallbackId, value: String) {
    match callback_id {
        InputCallbackId::SettingsBaseUrl => app.base_url = value,
        InputCallbackId::SettingsShelterId => app.shelter_id = value,
        InputCallbackId::SettingsAuthToken => app.auth_token = value,
        InputCallbackId::SliderValue(kind) => match value.trim().parse::<i32>() {
            Ok(v) => {
                // Typed values outside the slider range are clamped.
                let level = ResourceLevel::clamped(v);
                app.form.set(kind, level);
                app.ui.error = None;
                tracing::debug!("{}", status_line(kind, level));
            }
            Err(_) => {
                app.ui.error = Some(format!("{}: not a number: {value:?}", kind.title()));
            }
        },
    }
}

/// Refill the settings buffers from the saved config.
fn reload_settings_buffers(app: &mut App) {
    app.base_url = app.cfg.backend.base_url.clone();
    app.shelter_id = app.cfg.backend.shelter_id.clone();
    app.auth_token = app.cfg.backend.auth_token.clone();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{app::test_support::test_app, config::Config, status::ResourceKind};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    async fn press(app: &mut App, code: KeyCode) -> bool {
        handle_key(app, key(code)).await.unwrap()
    }

    async fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c)).await;
        }
    }

    #[tokio::test]
    async fn test_arrow_keys_move_focused_slider() {
        let (mut app, _rx, _tx) = test_app();
        press(&mut app, KeyCode::Right).await;
        assert_eq!(app.form.level(ResourceKind::Capacity).percent(), 51);
        press(&mut app, KeyCode::PageDown).await;
        assert_eq!(app.form.level(ResourceKind::Capacity).percent(), 41);

        press(&mut app, KeyCode::Down).await;
        press(&mut app, KeyCode::End).await;
        assert_eq!(app.form.level(ResourceKind::Food).percent(), 100);
        assert_eq!(app.form.line(ResourceKind::Food), "100% - EXCELLENT");
        press(&mut app, KeyCode::Home).await;
        assert_eq!(app.form.level(ResourceKind::Food).percent(), 0);
        // Other sliders stay where they were.
        assert_eq!(app.form.level(ResourceKind::Water).percent(), 50);
    }

    #[tokio::test]
    async fn test_quit_key() {
        let (mut app, _rx, _tx) = test_app();
        assert!(!press(&mut app, KeyCode::Right).await);
        assert!(press(&mut app, KeyCode::Char('q')).await);
    }

    #[tokio::test]
    async fn test_typed_value_is_clamped() {
        let (mut app, _rx, _tx) = test_app();
        press(&mut app, KeyCode::Char('e')).await;
        assert!(app.input_box.is_some());
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL))
            .await
            .unwrap();
        type_str(&mut app, "150").await;
        press(&mut app, KeyCode::Enter).await;
        assert!(app.input_box.is_none());
        assert_eq!(app.form.level(ResourceKind::Capacity), ResourceLevel::MAX);
    }

    #[tokio::test]
    async fn test_typed_garbage_sets_error() {
        let (mut app, _rx, _tx) = test_app();
        press(&mut app, KeyCode::Char('e')).await;
        press(&mut app, KeyCode::Backspace).await;
        press(&mut app, KeyCode::Backspace).await;
        type_str(&mut app, "lots").await;
        press(&mut app, KeyCode::Enter).await;
        assert_eq!(app.form.level(ResourceKind::Capacity).percent(), 50);
        assert!(app.ui.error.as_deref().unwrap().contains("not a number"));
    }

    #[tokio::test]
    async fn test_failed_dialog_retry_and_dismiss() {
        let (mut app, mut rx, _tx) = test_app();
        press(&mut app, KeyCode::Enter).await;
        assert!(matches!(rx.recv().await, Some(WorkerCmd::SendReport { .. })));
        let id = app.pending.as_ref().unwrap().submission_id;

        app.dialog = Some(crate::dialog::DialogState::send_failed("timeout"));
        // Slider keys are swallowed while the dialog is open.
        press(&mut app, KeyCode::Right).await;
        assert_eq!(app.form.level(ResourceKind::Capacity).percent(), 50);

        press(&mut app, KeyCode::Char('r')).await;
        match rx.recv().await {
            Some(WorkerCmd::SendReport { submission_id, .. }) => assert_eq!(submission_id, id),
            other => panic!("unexpected command: {other:?}"),
        }

        app.dialog = Some(crate::dialog::DialogState::send_failed("timeout"));
        press(&mut app, KeyCode::Esc).await;
        assert!(app.dialog.is_none());
        assert!(app.pending.is_none());
    }

    #[tokio::test]
    async fn test_settings_edit_and_save() {
        let (mut app, mut rx, _tx) = test_app();
        press(&mut app, KeyCode::Char('t')).await;
        assert_eq!(app.ui.screen, Screen::Settings);

        press(&mut app, KeyCode::Char('u')).await;
        type_str(&mut app, "http://localhost:3001").await;
        press(&mut app, KeyCode::Enter).await;
        press(&mut app, KeyCode::Char('i')).await;
        type_str(&mut app, "shelter-7").await;
        press(&mut app, KeyCode::Enter).await;

        // Save.
        press(&mut app, KeyCode::Enter).await;
        assert_eq!(app.ui.screen, Screen::Form);
        assert_eq!(app.cfg.backend.base_url, "http://localhost:3001");
        match rx.recv().await {
            Some(WorkerCmd::SaveSettings(cfg)) => assert_eq!(cfg.backend.shelter_id, "shelter-7"),
            other => panic!("unexpected command: {other:?}"),
        }
        let saved = Config::load_or_default(&app.cfg_path).unwrap();
        assert_eq!(saved, app.cfg);
        let _ = std::fs::remove_file(&app.cfg_path);
    }

    #[tokio::test]
    async fn test_settings_cancel_discards_edits() {
        let (mut app, _rx, _tx) = test_app();
        press(&mut app, KeyCode::Char('t')).await;
        press(&mut app, KeyCode::Char('i')).await;
        type_str(&mut app, "temp").await;
        press(&mut app, KeyCode::Enter).await;
        assert_eq!(app.shelter_id, "temp");
        press(&mut app, KeyCode::Esc).await;
        assert_eq!(app.ui.screen, Screen::Form);
        assert_eq!(app.shelter_id, "");
    }
}
