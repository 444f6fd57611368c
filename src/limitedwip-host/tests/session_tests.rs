//! End-to-end scenarios: events in, editor actions out.
//!
//! Toolbar refreshes happen on every tick and are filtered out unless a
//! test is about them.

use limitedwip_common::{CommitMessageSource, LimitedWipSettings, TcrAction, TcrVariant, TimeUnit};
use limitedwip_host::{
    CommitKind, Feature, HostError, HostEvent, IdeAction, Session, run_event_loop,
};
use limitedwip_watchdog::ChangeSize;
use pretty_assertions::assert_eq;
use tokio::sync::mpsc;

// =============================================================================
// Helpers
// =============================================================================

fn session(settings: LimitedWipSettings) -> Session {
    Session::new(settings).unwrap()
}

fn handle(session: &mut Session, event: HostEvent) -> Vec<IdeAction> {
    session
        .handle(event)
        .into_iter()
        .filter(|action| !action.is_toolbar_update())
        .collect()
}

fn append(path: &str, count: usize) -> HostEvent {
    HostEvent::AppendLines {
        path: path.to_string(),
        count,
        test: false,
    }
}

fn edit(path: &str, content: &str, test: bool) -> HostEvent {
    HostEvent::Edit {
        path: path.to_string(),
        content: content.to_string(),
        test,
        binary: false,
    }
}

fn passed(name: Option<&str>) -> HostEvent {
    HostEvent::TestPassed {
        name: name.map(str::to_string),
    }
}

fn commit() -> HostEvent {
    HostEvent::Commit { message: None }
}

fn committed(files: usize, kind: CommitKind) -> IdeAction {
    IdeAction::Committed {
        files,
        kind,
        message: String::new(),
    }
}

fn auto_revert_after(seconds: u32) -> LimitedWipSettings {
    LimitedWipSettings {
        auto_revert_enabled: true,
        time_till_revert: seconds,
        time_unit_till_revert: TimeUnit::Seconds,
        watchdog_enabled: false,
        ..Default::default()
    }
}

fn tcr(action: TcrAction) -> LimitedWipSettings {
    LimitedWipSettings {
        tcr_enabled: true,
        tcr_action_on_passed_test: action,
        ..Default::default()
    }
}

fn strict_watchdog(max_lines: u32) -> LimitedWipSettings {
    LimitedWipSettings {
        max_lines_in_change: max_lines,
        notification_interval_in_minutes: Some(1),
        no_commits_above_threshold: true,
        ..Default::default()
    }
}

// =============================================================================
// Auto-revert
// =============================================================================

#[test]
fn test_auto_revert_rolls_back_when_time_is_up() {
    let mut session = session(auto_revert_after(3));
    assert_eq!(handle(&mut session, edit("a.txt", "x\n", false)), vec![]);

    for seconds in 1..=3 {
        assert_eq!(handle(&mut session, HostEvent::Tick { seconds }), vec![]);
    }
    assert!(session.is_auto_revert_started());

    assert_eq!(
        handle(&mut session, HostEvent::Tick { seconds: 4 }),
        vec![
            IdeAction::ChangesReverted {
                feature: Feature::AutoRevert,
                files: 1
            },
            IdeAction::RevertNotification {
                feature: Feature::AutoRevert
            },
            IdeAction::AutoRevertStopped,
        ]
    );
    assert!(!session.workspace().has_changes());
    assert_eq!(session.workspace().content("a.txt"), None);
    assert!(!session.is_auto_revert_started());
}

#[test]
fn test_auto_revert_shows_countdown() {
    let mut session = session(auto_revert_after(2));
    session.handle(append("a.txt", 1));

    assert_eq!(
        session.handle(HostEvent::Tick { seconds: 1 }),
        vec![IdeAction::TimeTillRevert { seconds: 2 }]
    );
    assert_eq!(
        session.handle(HostEvent::Tick { seconds: 2 }),
        vec![IdeAction::TimeTillRevert { seconds: 1 }]
    );
}

#[test]
fn test_auto_revert_waits_for_open_commit_dialog() {
    let mut session = session(auto_revert_after(2));
    session.handle(append("a.txt", 1));
    session.handle(HostEvent::OpenCommitDialog);

    for seconds in 1..=4 {
        assert_eq!(handle(&mut session, HostEvent::Tick { seconds }), vec![]);
    }
    assert!(session.workspace().has_changes());

    assert_eq!(
        handle(&mut session, commit()),
        vec![
            committed(1, CommitKind::Commit),
            IdeAction::AutoRevertStopped
        ]
    );
    assert!(!session.is_auto_revert_started());
}

#[test]
fn test_auto_revert_pause() {
    let mut session = session(auto_revert_after(5));
    session.handle(append("a.txt", 1));
    session.handle(HostEvent::Tick { seconds: 1 });

    assert_eq!(
        session.handle(HostEvent::Pause),
        vec![IdeAction::AutoRevertPaused]
    );
    assert_eq!(session.handle(HostEvent::Tick { seconds: 2 }), vec![]);
    assert_eq!(
        session.handle(HostEvent::Pause),
        vec![IdeAction::TimeTillRevert { seconds: 5 }]
    );
}

#[test]
fn test_user_rollback_stops_auto_revert() {
    let mut session = session(auto_revert_after(5));
    session.handle(append("a.txt", 1));
    session.handle(HostEvent::Tick { seconds: 1 });

    assert_eq!(
        handle(&mut session, HostEvent::Rollback),
        vec![IdeAction::AutoRevertStopped]
    );
    assert!(!session.is_auto_revert_started());
}

// =============================================================================
// TCR
// =============================================================================

#[test]
fn test_tcr_commits_on_pass_and_reverts_on_failure() {
    let mut session = session(LimitedWipSettings {
        notify_on_tcr_revert: true,
        ..tcr(TcrAction::Commit)
    });
    session.handle(append("src/a.rs", 2));

    assert_eq!(
        handle(&mut session, passed(None)),
        vec![
            IdeAction::CommitRequested {
                feature: Feature::Tcr,
                kind: CommitKind::Commit
            },
            committed(1, CommitKind::Commit),
        ]
    );

    session.handle(append("src/a.rs", 1));
    assert_eq!(
        handle(&mut session, HostEvent::TestFailed { name: None }),
        vec![
            IdeAction::ChangesReverted {
                feature: Feature::Tcr,
                files: 1
            },
            IdeAction::RevertNotification {
                feature: Feature::Tcr
            },
        ]
    );
    assert_eq!(
        session.workspace().content("src/a.rs"),
        Some("src/a.rs:1\nsrc/a.rs:2\n")
    );
}

#[test]
fn test_tcr_blocks_untested_commit_until_forced() {
    let mut session = session(tcr(TcrAction::OpenCommitDialog));
    session.handle(append("src/a.rs", 2));

    assert_eq!(
        handle(&mut session, commit()),
        vec![
            IdeAction::CommitCancelled {
                feature: Feature::Tcr
            },
            IdeAction::CommitBlocked,
        ]
    );
    assert_eq!(
        handle(&mut session, HostEvent::ForceCommit { feature: Feature::Tcr }),
        vec![
            IdeAction::CommitRequested {
                feature: Feature::Tcr,
                kind: CommitKind::Commit
            },
            committed(1, CommitKind::Commit),
        ]
    );

    session.handle(append("src/a.rs", 1));
    assert_eq!(
        handle(&mut session, commit()),
        vec![
            IdeAction::CommitCancelled {
                feature: Feature::Tcr
            },
            IdeAction::CommitBlocked,
        ]
    );
}

#[test]
fn test_tcr_commit_needs_unchanged_modifications() {
    let mut session = session(tcr(TcrAction::OpenCommitDialog));
    session.handle(append("src/a.rs", 2));

    assert_eq!(
        handle(&mut session, passed(None)),
        vec![IdeAction::CommitDialogOpened {
            feature: Feature::Tcr
        }]
    );
    session.handle(append("src/a.rs", 1));
    assert_eq!(
        handle(&mut session, commit()),
        vec![
            IdeAction::CommitCancelled {
                feature: Feature::Tcr
            },
            IdeAction::CommitBlocked,
        ]
    );

    session.handle(passed(None));
    assert_eq!(
        handle(&mut session, commit()),
        vec![committed(1, CommitKind::Commit)]
    );
}

#[test]
fn test_tcr_amends_only_unpushed_commits_of_the_same_test() {
    let mut session = session(tcr(TcrAction::AmendCommit));
    session.handle(append("src/a.rs", 1));

    assert_eq!(
        handle(&mut session, passed(Some("t1"))),
        vec![IdeAction::CommitDialogOpened {
            feature: Feature::Tcr
        }]
    );
    assert_eq!(
        handle(&mut session, commit()),
        vec![committed(1, CommitKind::Commit)]
    );

    session.handle(append("src/a.rs", 1));
    assert_eq!(
        handle(&mut session, passed(Some("t1"))),
        vec![
            IdeAction::CommitRequested {
                feature: Feature::Tcr,
                kind: CommitKind::Amend
            },
            committed(1, CommitKind::Amend),
        ]
    );

    assert_eq!(handle(&mut session, HostEvent::Push), vec![IdeAction::Pushed]);
    session.handle(append("src/a.rs", 1));
    assert_eq!(
        handle(&mut session, passed(Some("t1"))),
        vec![IdeAction::CommitDialogOpened {
            feature: Feature::Tcr
        }]
    );
}

#[test]
fn test_tcr_revert_keeps_tests() {
    let mut session = session(LimitedWipSettings {
        do_not_revert_tests: true,
        ..tcr(TcrAction::Commit)
    });
    session.handle(edit("src/a.rs", "code\n", false));
    session.handle(edit("tests/a_test.rs", "test\n", true));

    assert_eq!(
        handle(&mut session, HostEvent::TestFailed { name: None }),
        vec![IdeAction::ChangesReverted {
            feature: Feature::Tcr,
            files: 1
        }]
    );
    assert_eq!(session.workspace().changed_paths(), vec!["tests/a_test.rs"]);
}

// =============================================================================
// Watchdog
// =============================================================================

#[test]
fn test_watchdog_blocks_big_commit_until_forced() {
    let mut session = session(strict_watchdog(5));
    session.handle(append("a.txt", 10));

    assert_eq!(
        handle(&mut session, HostEvent::Tick { seconds: 1 }),
        vec![IdeAction::ChangeSizeTooBig {
            size: ChangeSize::new(10),
            max_lines: 5
        }]
    );
    assert_eq!(handle(&mut session, HostEvent::Tick { seconds: 2 }), vec![]);

    assert_eq!(
        handle(&mut session, commit()),
        vec![
            IdeAction::CommitCancelled {
                feature: Feature::Watchdog
            },
            IdeAction::CommitBlocked,
        ]
    );
    assert_eq!(
        handle(
            &mut session,
            HostEvent::ForceCommit {
                feature: Feature::Watchdog
            }
        ),
        vec![
            IdeAction::CommitRequested {
                feature: Feature::Watchdog,
                kind: CommitKind::Commit
            },
            committed(1, CommitKind::Commit),
            IdeAction::ChangeSizeNotificationDismissed,
        ]
    );
}

#[test]
fn test_watchdog_toolbar_ignores_excluded_files() {
    let mut session = session(LimitedWipSettings {
        exclusions: "*.approved".to_string(),
        ..strict_watchdog(5)
    });
    session.handle(append("golden.approved", 10));

    assert_eq!(
        session.handle(HostEvent::Tick { seconds: 1 }),
        vec![IdeAction::ChangeSize {
            size: ChangeSize::EMPTY,
            max_lines: 5
        }]
    );
    assert_eq!(
        handle(&mut session, commit()),
        vec![committed(1, CommitKind::Commit)]
    );
}

#[test]
fn test_watchdog_notifications_skipped_until_commit() {
    let mut session = session(LimitedWipSettings {
        no_commits_above_threshold: false,
        ..strict_watchdog(5)
    });
    session.handle(append("a.txt", 10));

    assert_eq!(
        handle(&mut session, HostEvent::SkipWatchdogNotifications),
        vec![IdeAction::NotificationsSkippedUntilCommit { skipped: true }]
    );
    assert_eq!(handle(&mut session, HostEvent::Tick { seconds: 1 }), vec![]);
    assert_eq!(
        handle(&mut session, commit()),
        vec![
            committed(1, CommitKind::Commit),
            IdeAction::NotificationsSkippedUntilCommit { skipped: false },
        ]
    );
}

#[test]
fn test_limbo_commits_instead_of_amending() {
    let mut session = session(LimitedWipSettings {
        tcr_variant: TcrVariant::Limbo,
        ..tcr(TcrAction::AmendCommit)
    });
    session.handle(append("src/a.rs", 1));

    assert_eq!(
        handle(&mut session, passed(Some("t1"))),
        vec![
            IdeAction::CommitRequested {
                feature: Feature::Tcr,
                kind: CommitKind::Commit
            },
            committed(1, CommitKind::Commit),
        ]
    );
    session.handle(append("src/a.rs", 1));
    assert_eq!(
        handle(&mut session, commit()),
        vec![
            IdeAction::CommitCancelled {
                feature: Feature::Tcr
            },
            IdeAction::CommitBlocked,
        ]
    );
}

#[test]
fn test_switching_to_limbo_starts_with_a_closed_gate() {
    let mut session = session(tcr(TcrAction::OpenCommitDialog));
    session.handle(append("src/a.rs", 1));
    session.handle(passed(None));

    let actions = handle(
        &mut session,
        HostEvent::Settings {
            settings: LimitedWipSettings {
                tcr_variant: TcrVariant::Limbo,
                ..tcr(TcrAction::OpenCommitDialog)
            },
        },
    );
    assert_eq!(
        actions.last(),
        Some(&IdeAction::SettingsApplied {
            feature: Feature::Tcr
        })
    );
    assert_eq!(
        handle(&mut session, commit()),
        vec![
            IdeAction::CommitCancelled {
                feature: Feature::Tcr
            },
            IdeAction::CommitBlocked,
        ]
    );
}

// =============================================================================
// Commit messages
// =============================================================================

#[test]
fn test_automatic_commit_reuses_last_message() {
    let mut session = session(LimitedWipSettings::default());
    session.handle(append("src/a.rs", 1));
    assert_eq!(
        handle(
            &mut session,
            HostEvent::Commit {
                message: Some("Parse headers".to_string())
            }
        ),
        vec![IdeAction::Committed {
            files: 1,
            kind: CommitKind::Commit,
            message: "Parse headers".to_string(),
        }]
    );

    session.handle(HostEvent::Settings {
        settings: tcr(TcrAction::Commit),
    });
    session.handle(append("src/a.rs", 1));
    assert_eq!(
        handle(&mut session, passed(None)),
        vec![
            IdeAction::CommitRequested {
                feature: Feature::Tcr,
                kind: CommitKind::Commit
            },
            IdeAction::Committed {
                files: 1,
                kind: CommitKind::Commit,
                message: "Parse headers".to_string(),
            },
        ]
    );
}

#[test]
fn test_automatic_commit_uses_change_list_name() {
    let mut session = session(LimitedWipSettings {
        commit_message_source: CommitMessageSource::ChangeListName,
        ..tcr(TcrAction::Commit)
    });
    session.handle(HostEvent::RenameChangeList {
        name: "Parser".to_string(),
    });
    session.handle(append("src/a.rs", 1));

    assert_eq!(
        handle(&mut session, passed(None)),
        vec![
            IdeAction::CommitRequested {
                feature: Feature::Tcr,
                kind: CommitKind::Commit
            },
            IdeAction::Committed {
                files: 1,
                kind: CommitKind::Commit,
                message: "Parser".to_string(),
            },
        ]
    );
    assert_eq!(session.workspace().last_commit_message(), Some("Parser"));
}

// =============================================================================
// Settings and lifecycle
// =============================================================================

#[test]
fn test_invalid_settings_are_rejected() {
    let mut session = session(LimitedWipSettings::default());
    let actions = session.handle(HostEvent::Settings {
        settings: LimitedWipSettings {
            max_lines_in_change: 0,
            ..Default::default()
        },
    });

    assert!(matches!(
        actions.as_slice(),
        [IdeAction::SettingsRejected { .. }]
    ));
    assert_eq!(session.settings(), &LimitedWipSettings::default());
}

#[test]
fn test_settings_update_reaches_every_engine() {
    let mut session = session(LimitedWipSettings::default());
    let actions = session.handle(HostEvent::Settings {
        settings: LimitedWipSettings {
            auto_revert_enabled: true,
            ..Default::default()
        },
    });

    assert_eq!(
        actions,
        vec![
            IdeAction::SettingsApplied {
                feature: Feature::AutoRevert
            },
            IdeAction::SettingsApplied {
                feature: Feature::Watchdog
            },
            IdeAction::SettingsApplied {
                feature: Feature::Tcr
            },
        ]
    );
    assert!(session.settings().auto_revert_enabled);
}

#[test]
fn test_session_rejects_invalid_initial_settings() {
    let result = Session::new(LimitedWipSettings {
        exclusions: "foo(".to_string(),
        ..Default::default()
    });
    assert!(matches!(result, Err(HostError::Settings(_))));
}

#[tokio::test]
async fn test_event_loop_handles_events_in_order() {
    let (tx, rx) = mpsc::channel(16);
    for event in [
        edit("a.txt", "x\n", false),
        HostEvent::Tick { seconds: 1 },
        HostEvent::Tick { seconds: 2 },
    ] {
        tx.send(event).await.unwrap();
    }
    drop(tx);

    let mut seen = Vec::new();
    let session = run_event_loop(session(auto_revert_after(1)), rx, |actions| {
        seen.extend(actions.iter().filter(|a| !a.is_toolbar_update()).cloned());
    })
    .await;

    assert_eq!(
        seen,
        vec![
            IdeAction::ChangesReverted {
                feature: Feature::AutoRevert,
                files: 1
            },
            IdeAction::RevertNotification {
                feature: Feature::AutoRevert
            },
            IdeAction::AutoRevertStopped,
        ]
    );
    assert!(!session.workspace().has_changes());
}
