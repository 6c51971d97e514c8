//! Scripted console sessions.
//!
//! Each test feeds a whole session through [`carrel_cli::run`] and checks
//! the transcript and what reached storage.

use std::io::Cursor;

use carrel_cli::{ReplConfig, run};
use carrel_core::{
    ChaoticStorage, FileStorage, LibraryConfig, ManualEnv, MemoryStorage, Runtime, SeatCoord,
    Storage,
};
use tempfile::tempdir;

fn session<S: Storage>(storage: S, config: LibraryConfig, script: impl AsRef<[u8]>) -> String {
    let mut runtime = Runtime::open(storage, ManualEnv::new(1_700_000_000), config);
    let mut out = Vec::new();
    run(&mut runtime, Cursor::new(script.as_ref()), &mut out, ReplConfig::default()).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn admin_reserves_and_user_cancels() {
    let storage = MemoryStorage::new();
    let transcript = session(
        storage.clone(),
        LibraryConfig::default(),
        "login Admin\n\
         reserve 1 1 2 1 B\n\
         view 1 1\n\
         logout\n\
         login b\n\
         view 1 1\n\
         cancel 1 1 2 1\n\
         quit\n",
    );

    insta::assert_snapshot!(transcript, @r"
    Logged in as administrator.
    Reserved floor 1 row 1 col 2 day 1 (Sun) for B.
    === Floor 1 (4 rows x 4 cols) - Sun ===
        1   2   3   4
    1 | 0   B   0   0
    2 | 0   0   0   0
    3 | 0   0   0   0
    4 | 0   0   0   0
    Admin logged out.
    Logged in as user B.
    === Floor 1 (4 rows x 4 cols) - Sun ===
        1   2   3   4
    1 | 0   2   0   0
    2 | 0   0   0   0
    3 | 0   0   0   0
    4 | 0   0   0   0
    Cancelled B's reservation of floor 1 row 1 col 2 day 1 (Sun).
    Goodbye.
    ");

    // Reserve, cancel and quit each saved.
    assert_eq!(storage.save_count(), 3);
    assert_eq!(storage.load().unwrap().unwrap().reserved_count(), 0);
}

#[test]
fn errors_are_reported_and_the_loop_continues() {
    let storage = MemoryStorage::new();
    let transcript = session(
        storage.clone(),
        LibraryConfig::default(),
        "reserve 1 1 1 1\n\
         login Bob\n\
         login C\n\
         reserve 1 5 1 1\n\
         reserve 1 1 1 1 D\n\
         list\n\
         view 0 1\n\
         fly\n",
    );

    insta::assert_snapshot!(transcript, @r#"
    Error: not authorized: log in first
    Error: invalid user name "Bob": expected a letter A-Z or Admin
    Logged in as user C.
    Error: invalid coordinate: seat (5, 1) is outside the floor's 4x4 layout
    Error: not authorized: you can only reserve for yourself, not for 'D'
    Error: not authorized: administrator privileges required
    Error: invalid floor: "0" is not a number from 1 up
    Error: unknown command "fly"; type `help` for the list
    Goodbye.
    "#);

    // Only the implicit quit at end of input saved.
    assert_eq!(storage.save_count(), 1);
}

#[test]
fn shrinking_a_floor_reports_cancellations() {
    let transcript = session(
        MemoryStorage::new(),
        LibraryConfig::default(),
        "login Admin\n\
         reserve 2 4 4 3 A\n\
         reserve 2 1 1 3 A\n\
         resize 2 2 2\n\
         view 2 3\n\
         list\n",
    );

    assert!(transcript.contains(
        "Floor 2 resized from 4x4 to 2x2; cancelled 1 reservation outside the new layout."
    ));
    assert!(transcript.contains("=== Floor 2 (2 rows x 2 cols) - Tue ===\n    1   2\n1 | A   0\n"));
    assert!(transcript.contains("Floor 2 Tue (1,1) - user A, at 2023-11-14 22:13:20 UTC\n"));
    assert!(!transcript.contains("(4,4)"));
}

#[test]
fn fixed_layout_refuses_resize() {
    let transcript = session(
        MemoryStorage::new(),
        LibraryConfig { resizable_floors: false },
        "login Admin\nresize 1 2 2\n",
    );
    assert!(transcript.contains("Error: invalid floor configuration for floor 1: 2x2"));
}

#[test]
fn failed_save_is_reported_but_kept() {
    let storage = ChaoticStorage::new(MemoryStorage::new(), 1.0);
    let transcript =
        session(storage.clone(), LibraryConfig::default(), "login A\nreserve 3 2 2 5\n");

    assert!(transcript.contains("Reserved floor 3 row 2 col 2 day 5 (Thu) for A."));
    assert!(transcript.contains(
        "Warning: change applied but not saved: I/O error: chaotic failure injection"
    ));
    assert!(transcript.ends_with(
        "Warning: final save failed: I/O error: chaotic failure injection\nGoodbye.\n"
    ));
    assert_eq!(storage.inner().save_count(), 0);
}

#[test]
fn undecodable_line_is_skipped() {
    let storage = MemoryStorage::new();
    let transcript = session(
        storage.clone(),
        LibraryConfig::default(),
        b"login Admin\nview \xff\xfe 1\nreserve 1 1 1 1 A\nquit\n",
    );

    insta::assert_snapshot!(transcript, @r"
    Logged in as administrator.
    Error: input line is not valid UTF-8
    Reserved floor 1 row 1 col 1 day 1 (Sun) for A.
    Goodbye.
    ");

    assert_eq!(storage.save_count(), 2);
    assert_eq!(storage.load().unwrap().unwrap().reserved_count(), 1);
}

#[test]
fn windows_line_endings_are_accepted() {
    let storage = MemoryStorage::new();
    let transcript = session(
        storage.clone(),
        LibraryConfig::default(),
        "login Admin\r\nreserve 2 1 1 1 C\r\nquit\r\n",
    );

    assert!(transcript.contains("Reserved floor 2 row 1 col 1 day 1 (Sun) for C."));
    assert!(!transcript.contains("Error"));
    assert_eq!(storage.load().unwrap().unwrap().reserved_count(), 1);
}

#[test]
fn help_lists_every_command() {
    let transcript = session(MemoryStorage::new(), LibraryConfig::default(), "help\n");
    for word in ["login", "reserve", "cancel-day", "cancel-floor", "resize", "quit"] {
        assert!(transcript.contains(word), "help is missing {word}");
    }
}

#[test]
fn data_file_survives_between_sessions() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("library_data.dat");

    session(
        FileStorage::new(&path),
        LibraryConfig::default(),
        "login Admin\nreserve 5 4 4 7 Z\nquit\n",
    );

    let storage = FileStorage::new(&path);
    let grid = storage.load().unwrap().unwrap();
    let seat = grid.get(SeatCoord::new(4, 3, 3, 6)).unwrap();
    assert_eq!(seat.owner().map(|o| o.as_char()), Some('Z'));
    assert_eq!(seat.reserved_at(), Some(1_700_000_000));

    let transcript =
        session(storage, LibraryConfig::default(), "login Z\nview 5 7\n");
    assert!(transcript.contains("4 | 0   0   0   2\n"));
}
