//! End-to-end tests of the `bidboard` binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn bidboard() -> Command {
    let mut cmd = Command::cargo_bin("bidboard").unwrap();
    cmd.env("BIDBOARD_TEST_TIME", "2025-03-10")
        .env("LANG", "en_US.UTF-8")
        .env_remove("LC_ALL")
        .env_remove("LC_TIME")
        .env_remove("BIDBOARD_DATA_DIR")
        .env_remove("BIDBOARD_USER")
        .arg("--no-color");
    cmd
}

fn signed_in() -> Command {
    let mut cmd = bidboard();
    cmd.env("BIDBOARD_USER", "Jordan");
    cmd
}

mod guard_tests {
    use super::*;

    #[test]
    fn test_calendar_requires_sign_in() {
        bidboard()
            .arg("calendar")
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("sign in required for calendar"));
    }

    #[test]
    fn test_summary_requires_sign_in() {
        bidboard()
            .assert()
            .failure()
            .stderr(predicate::str::contains("sign in required for home"));
    }

    #[test]
    fn test_blank_user_is_anonymous() {
        bidboard()
            .env("BIDBOARD_USER", "   ")
            .arg("projects")
            .assert()
            .failure()
            .stderr(predicate::str::contains("sign in required for projects"));
    }

    #[test]
    fn test_bids_and_messages_require_sign_in() {
        bidboard()
            .arg("bids")
            .assert()
            .failure()
            .stderr(predicate::str::contains("sign in required for bids"));
        bidboard()
            .arg("messages")
            .assert()
            .failure()
            .stderr(predicate::str::contains("sign in required for messages"));
    }
}

mod calendar_tests {
    use super::*;

    #[test]
    fn test_fixture_month() {
        signed_in()
            .arg("calendar")
            .assert()
            .success()
            .stdout(predicate::str::contains("March 2025"))
            .stdout(predicate::str::contains("Highlighted: Friday, March 14"));
    }

    #[test]
    fn test_explicit_month() {
        signed_in()
            .args(["calendar", "2", "2024"])
            .assert()
            .success()
            .stdout(predicate::str::contains("February 2024"))
            .stdout(predicate::str::contains("No events this month."))
            .stdout(predicate::str::contains("Highlighted:").not());
    }

    #[test]
    fn test_shift_back() {
        signed_in()
            .args(["calendar", "--shift", "-1"])
            .assert()
            .success()
            .stdout(predicate::str::contains("February 2025"));
    }

    #[test]
    fn test_shift_keeps_explicit_highlight() {
        signed_in()
            .args(["calendar", "2", "2024", "--shift", "1", "--highlight", "2024-03-05"])
            .assert()
            .success()
            .stdout(predicate::str::contains("March 2024"))
            .stdout(predicate::str::contains("Highlighted: Tuesday, March 5"));
    }

    #[test]
    fn test_invalid_month() {
        signed_in()
            .args(["calendar", "13", "2024"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid month"));
    }
}

mod home_tests {
    use super::*;

    #[test]
    fn test_summary_greets_signed_in_user() {
        signed_in()
            .arg("summary")
            .assert()
            .success()
            .stdout(predicate::str::contains("Welcome back, Jordan!"))
            .stdout(predicate::str::contains("[Monthly]"));
    }

    #[test]
    fn test_schedule_order() {
        signed_in()
            .arg("schedule")
            .assert()
            .success()
            .stdout(
                predicate::str::is_match(
                    "(?s)Kitchen remodel kickoff.*Site walkthrough.*Roof inspection",
                )
                .unwrap(),
            );
    }

    #[test]
    fn test_schedule_grid() {
        signed_in()
            .args(["schedule", "--grid"])
            .assert()
            .success()
            .stdout(predicate::str::contains("March 2025"))
            .stdout(predicate::str::contains("Kitchen remodel kickoff  [Appointment]"));
    }

    #[test]
    fn test_schedule_grid_next_month() {
        signed_in()
            .args(["schedule", "--grid", "--shift", "1"])
            .assert()
            .success()
            .stdout(predicate::str::contains("April 2025"))
            .stdout(predicate::str::contains("No events this month."));
    }

    #[test]
    fn test_notifications_by_category() {
        signed_in()
            .args(["notifications", "-c", "bids"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Kitchen Remodel bid shortlisted"))
            .stdout(predicate::str::contains("New lead in Forest Hills").not());
    }
}

mod projects_tests {
    use super::*;

    #[test]
    fn test_search() {
        signed_in()
            .args(["projects", "-q", "brook"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Kitchen Remodel"))
            .stdout(predicate::str::contains("Roof Repair").not());
    }

    #[test]
    fn test_unknown_status() {
        signed_in()
            .args(["projects", "-s", "Pending"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Pending"));
    }
}

mod bids_tests {
    use super::*;

    #[test]
    fn test_table() {
        signed_in()
            .arg("bids")
            .assert()
            .success()
            .stdout(predicate::str::contains("My Bids"))
            .stdout(predicate::str::contains("$18,500"));
    }

    #[test]
    fn test_edit_applies_in_memory() {
        signed_in()
            .args(["bids", "--edit", "bid-1002", "--amount", "7500", "--status", "awarded"])
            .assert()
            .success()
            .stdout(predicate::str::contains("$7,500 | Awarded"));

        signed_in()
            .arg("bids")
            .assert()
            .success()
            .stdout(predicate::str::contains("$7,200"));
    }

    #[test]
    fn test_view_only_bid_cannot_be_edited() {
        signed_in()
            .args(["bids", "--edit", "bid-1003"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Bid bid-1003 cannot be edited"));
    }

    #[test]
    fn test_unknown_bid() {
        signed_in()
            .args(["bids", "--view", "bid-9999"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("no bid with id \"bid-9999\""));
    }
}

mod data_dir_tests {
    use super::*;

    #[test]
    fn test_missing_fixture_file() {
        let dir = tempfile::tempdir().unwrap();
        signed_in()
            .arg("--data-dir")
            .arg(dir.path())
            .arg("messages")
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to read"));
    }

    #[test]
    fn test_messages_unread_count() {
        signed_in()
            .arg("messages")
            .assert()
            .success()
            .stdout(predicate::str::contains("Messages (2 unread)"));
    }
}
