use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use iut_erp_core::{
    errors::ErpError,
    models::time_slot::{NewTimeSlot, TimeSlot, TimeSlotForm},
    occupancy::{current_slot, is_occupied, next_slot, occupancy},
};

const C1: i64 = 1;
const C2: i64 = 2;

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 6, hour, minute, 0).unwrap()
}

fn slot(id: i64, classroom_id: i64, start: DateTime<Utc>, end: DateTime<Utc>) -> TimeSlot {
    TimeSlot {
        id,
        title: format!("Cours {}", id),
        start_time: start.to_rfc3339(),
        end_time: end.to_rfc3339(),
        classroom_id,
        teacher_id: 1,
        course_id: 1,
        color: None,
        course_name: None,
        teacher_name: None,
        classroom_name: None,
        created_at: None,
    }
}

#[fixture]
fn morning() -> Vec<TimeSlot> {
    vec![
        slot(1, C1, at(9, 0), at(10, 0)),
        slot(2, C1, at(11, 0), at(12, 0)),
        slot(3, C2, at(10, 0), at(11, 0)),
    ]
}

#[rstest]
fn test_scenario_during_first_slot(morning: Vec<TimeSlot>) {
    let result = occupancy(C1, at(9, 30), &morning).unwrap();

    assert!(result.is_occupied());
    assert_eq!(result.current.map(|s| s.id), Some(1));
    assert_eq!(result.next.map(|s| s.id), Some(2));
}

#[rstest]
fn test_scenario_between_slots(morning: Vec<TimeSlot>) {
    let result = occupancy(C1, at(10, 30), &morning).unwrap();

    assert!(!result.is_occupied());
    assert_eq!(result.current, None);
    assert_eq!(result.next.map(|s| s.id), Some(2));
}

#[rstest]
fn test_scenario_after_last_slot(morning: Vec<TimeSlot>) {
    let result = occupancy(C1, at(13, 0), &morning).unwrap();

    assert!(!result.is_occupied());
    assert_eq!(result.next, None);
}

#[rstest]
#[case(at(9, 0), true)]
#[case(at(9, 30), true)]
#[case(at(10, 0), true)]
#[case(at(8, 59), false)]
#[case(at(10, 1), false)]
fn test_bounds_are_inclusive(#[case] instant: DateTime<Utc>, #[case] expected: bool) {
    let slots = vec![slot(1, C1, at(9, 0), at(10, 0))];

    assert_eq!(is_occupied(C1, instant, &slots).unwrap(), expected);
}

#[test]
fn test_occupied_holds_across_the_whole_window() {
    let start = at(8, 0);
    let end = at(12, 0);
    let slots = vec![slot(1, C1, start, end)];

    let mut instant = start;
    while instant <= end {
        assert!(is_occupied(C1, instant, &slots).unwrap(), "free at {}", instant);
        instant += Duration::minutes(7);
    }
    assert!(is_occupied(C1, end, &slots).unwrap());
    assert!(!is_occupied(C1, start - Duration::seconds(1), &slots).unwrap());
    assert!(!is_occupied(C1, end + Duration::seconds(1), &slots).unwrap());
}

#[rstest]
fn test_other_classrooms_do_not_count(morning: Vec<TimeSlot>) {
    assert!(!is_occupied(C2, at(9, 30), &morning).unwrap());
    assert!(is_occupied(C2, at(10, 30), &morning).unwrap());
    assert!(!is_occupied(42, at(9, 30), &morning).unwrap());
    assert_eq!(next_slot(42, at(7, 0), &morning).unwrap(), None);
}

#[test]
fn test_empty_collection() {
    assert!(!is_occupied(C1, at(9, 0), &[]).unwrap());
    assert_eq!(current_slot(C1, at(9, 0), &[]).unwrap(), None);
    assert_eq!(next_slot(C1, at(9, 0), &[]).unwrap(), None);
}

#[rstest]
fn test_next_slot_never_starts_at_or_before_now(morning: Vec<TimeSlot>) {
    for hour in 6..14 {
        for minute in [0, 15, 30, 45] {
            let now = at(hour, minute);
            if let Some(next) = next_slot(C1, now, &morning).unwrap() {
                assert!(next.window(&Utc).unwrap().start > now);
            }
        }
    }
}

#[test]
fn test_next_slot_is_earliest_regardless_of_order() {
    let slots = vec![
        slot(1, C1, at(15, 0), at(16, 0)),
        slot(2, C1, at(11, 0), at(12, 0)),
        slot(3, C1, at(13, 0), at(14, 0)),
    ];

    assert_eq!(next_slot(C1, at(8, 0), &slots).unwrap().map(|s| s.id), Some(2));
    assert_eq!(next_slot(C1, at(11, 0), &slots).unwrap().map(|s| s.id), Some(3));
}

#[test]
fn test_equal_start_times_keep_first_encountered() {
    let slots = vec![
        slot(7, C1, at(14, 0), at(15, 0)),
        slot(4, C1, at(14, 0), at(16, 0)),
    ];

    assert_eq!(next_slot(C1, at(9, 0), &slots).unwrap().map(|s| s.id), Some(7));
}

#[test]
fn test_overlapping_slots_report_first_match() {
    let slots = vec![
        slot(5, C1, at(9, 0), at(11, 0)),
        slot(6, C1, at(10, 0), at(12, 0)),
    ];

    assert_eq!(current_slot(C1, at(10, 30), &slots).unwrap().map(|s| s.id), Some(5));
    assert_eq!(current_slot(C1, at(11, 30), &slots).unwrap().map(|s| s.id), Some(6));
}

#[test]
fn test_malformed_slot_fails_the_query() {
    let mut slots = vec![slot(1, C1, at(9, 0), at(10, 0))];
    let mut broken = slot(2, C1, at(11, 0), at(12, 0));
    broken.end_time = "not a date".to_string();
    slots.push(broken);

    // The first slot already answers "occupied" but the broken one is still reported.
    match is_occupied(C1, at(9, 30), &slots) {
        Err(ErpError::InvalidTimeSlot { id, .. }) => assert_eq!(id, 2),
        other => panic!("expected InvalidTimeSlot, got {:?}", other),
    }
    assert!(next_slot(C1, at(9, 30), &slots).is_err());
}

#[test]
fn test_malformed_slot_of_other_classroom_is_ignored() {
    let mut broken = slot(2, C2, at(11, 0), at(12, 0));
    broken.start_time = String::new();
    let slots = vec![slot(1, C1, at(9, 0), at(10, 0)), broken];

    assert!(is_occupied(C1, at(9, 30), &slots).unwrap());
    assert!(is_occupied(C2, at(9, 30), &slots).is_err());
}

#[test]
fn test_inverted_window_fails_the_query() {
    let slots = vec![slot(3, C1, at(12, 0), at(11, 0))];

    assert!(matches!(
        occupancy(C1, at(11, 30), &slots),
        Err(ErpError::InvalidTimeSlot { id: 3, .. })
    ));
}

#[rstest]
fn test_query_is_idempotent(morning: Vec<TimeSlot>) {
    let first = occupancy(C1, at(10, 30), &morning).unwrap();
    let second = occupancy(C1, at(10, 30), &morning).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_form_slot_is_read_on_the_campus_clock() {
    let douala = FixedOffset::east_opt(3600).unwrap();
    let local = |hour, minute| douala.with_ymd_and_hms(2024, 5, 6, hour, minute, 0).unwrap();
    let form = TimeSlotForm {
        date: "2024-05-06".to_string(),
        start_time: "09:00".to_string(),
        end_time: "10:00".to_string(),
        classroom_id: C1,
        ..TimeSlotForm::default()
    };
    let payload = NewTimeSlot::from_form(&form, &[]).unwrap();
    let mut booked = slot(1, C1, at(9, 0), at(10, 0));
    booked.start_time = payload.start_time;
    booked.end_time = payload.end_time;
    let slots = vec![booked];

    assert!(is_occupied(C1, local(9, 0), &slots).unwrap());
    assert!(is_occupied(C1, local(9, 30), &slots).unwrap());
    assert!(!is_occupied(C1, local(10, 30), &slots).unwrap());
    // 08:30 UTC is 09:30 on the campus clock.
    assert!(is_occupied(C1, at(8, 30).with_timezone(&douala), &slots).unwrap());
    assert_eq!(next_slot(C1, local(8, 0), &slots).unwrap().map(|s| s.id), Some(1));
}
