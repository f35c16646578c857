//! Golden tests for export output.
//!
//! These pin the exact bytes of each export so accidental format drift
//! shows up as a snapshot diff. The snapshots are inline; run
//! `cargo insta review` after intentional changes.

use crate::convert::{ConversionRequest, SourceFile, convert};
use crate::export::{combined_csv, combined_json, per_file_json};

/// One fully-populated event plus one event-less file.
fn sample_request() -> ConversionRequest {
    let team = "BEGIN:VCALENDAR\n\
                VERSION:2.0\n\
                BEGIN:VEVENT\n\
                UID:a1@example.com\n\
                SUMMARY:Standup\n\
                DESCRIPTION:Daily sync\n\
                LOCATION:Room 1\n\
                DTSTART:20250917T153000Z\n\
                DTEND:20250917T160000Z\n\
                ORGANIZER:mailto:boss@example.com\n\
                END:VEVENT\n\
                END:VCALENDAR\n";
    ConversionRequest {
        files: vec![
            SourceFile::new("team.ics", team),
            SourceFile::new("empty.ics", "BEGIN:VCALENDAR\nEND:VCALENDAR\n"),
        ],
        options: Default::default(),
    }
}

#[test]
fn golden_combined_csv() {
    let result = convert(&sample_request());
    let bytes = combined_csv(&result).unwrap().expect("has data");
    let text = String::from_utf8(bytes).unwrap();

    insta::assert_snapshot!(text.trim_end(), @r"
    file,uid,summary,start,end,location,description,rrule
    team.ics,a1@example.com,Standup,2025-09-17T15:30:00,2025-09-17T16:00:00,Room 1,Daily sync,
    ");
}

#[test]
fn golden_combined_json() {
    let result = convert(&sample_request());
    let bytes = combined_json(&result).unwrap();
    let text = String::from_utf8(bytes).unwrap();

    insta::assert_snapshot!(text, @r#"
    [
      {
        "UID": "a1@example.com",
        "SUMMARY": "Standup",
        "DESCRIPTION": "Daily sync",
        "LOCATION": "Room 1",
        "DTSTART": "20250917T153000Z",
        "DTEND": "20250917T160000Z",
        "RRULE": "",
        "ORGANIZER": "mailto:boss@example.com",
        "ATTENDEE": "",
        "DTSTART_ISO": "2025-09-17T15:30:00",
        "DTEND_ISO": "2025-09-17T16:00:00",
        "file": "team.ics"
      }
    ]
    "#);
}

#[test]
fn golden_per_file_json() {
    let result = convert(&sample_request());
    let bytes = per_file_json(&result).unwrap();
    let text = String::from_utf8(bytes).unwrap();

    insta::assert_snapshot!(text, @r#"
    {
      "empty.ics": [],
      "team.ics": [
        {
          "UID": "a1@example.com",
          "SUMMARY": "Standup",
          "DESCRIPTION": "Daily sync",
          "LOCATION": "Room 1",
          "DTSTART": "20250917T153000Z",
          "DTEND": "20250917T160000Z",
          "RRULE": "",
          "ORGANIZER": "mailto:boss@example.com",
          "ATTENDEE": "",
          "DTSTART_ISO": "2025-09-17T15:30:00",
          "DTEND_ISO": "2025-09-17T16:00:00"
        }
      ]
    }
    "#);
}
