#![cfg(feature = "std")]

use csv::ReaderBuilder;

use colbind::{
    ConvertError, Csv, Descriptor, Error, Kind, Primitive, Record, Rejected, Session, Slot, Value,
};

#[derive(Debug, Default, Clone, PartialEq)]
struct Member {
    first_name: String,
    second_name: String,
    age: i32,
    height: f64,
    visits: u32,
    badge: Badge,
}

impl Record for Member {
    fn fields() -> Vec<Descriptor<Self>> {
        type D = Descriptor<Member>;

        vec![
            D::new("first_name", "String", Some(Kind::String), |m| {
                Some(Slot::String(&mut m.first_name))
            }),
            D::new("surname", "String", Some(Kind::String), |m| {
                Some(Slot::String(&mut m.second_name))
            })
            .column("Second Name"),
            D::new("age", "i32", Some(i32::KIND), |m| Some(m.age.slot())),
            D::new("height", "f64", Some(Kind::Float), |m| Some(Slot::Float(&mut m.height))),
            D::new("visits", "u32", Some(Kind::Unsigned), |m| {
                Some(Slot::Unsigned(&mut m.visits))
            }),
            D::new("badge", "Badge", Some(Kind::Custom), |m| Some(Slot::Custom(&mut m.badge))),
        ]
    }
}

/// A badge number, written in hexadecimal as `0x1f`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Badge(u32);

impl Value for Badge {
    fn render(&self) -> String {
        format!("{:#x}", self.0)
    }

    fn set(&mut self, text: &str) -> Result<(), Rejected> {
        let digits = text
            .strip_prefix("0x")
            .ok_or_else(|| Rejected(format!("{text:?} has no 0x prefix")))?;

        self.0 = u32::from_str_radix(digits, 16).map_err(|e| Rejected(e.to_string()))?;
        Ok(())
    }
}

fn member(first: &str, second: &str, age: i32, height: f64, visits: u32, badge: u32) -> Member {
    Member {
        first_name: first.into(),
        second_name: second.into(),
        age,
        height,
        visits,
        badge: Badge(badge),
    }
}

fn expected_members() -> Vec<Member> {
    vec![
        member("Ada", "Lovelace", 36, 1.65, 12, 0x1f),
        member("Alan", "Turing", 0, 1.78, 3, 0xff),
        member("Grace", "Hopper", 85, 1.68, 0, 0x0),
    ]
}

fn decode_all(source: Csv<std::fs::File>) -> Vec<Member> {
    let mut member = Member::default();
    let mut session = Session::new(source, &mut member).unwrap();

    let mut members = vec![];
    while session.advance() {
        members.push(session.record().clone());
    }

    session.finish().unwrap();
    members
}

#[test]
fn decode_csv_with_headers() {
    const PATH: &str = "fixtures/people.csv";
    let reader = ReaderBuilder::new().from_path(PATH).unwrap();
    assert_eq!(decode_all(Csv::new(reader)), expected_members());
}

#[test]
fn decode_csv_without_headers() {
    const PATH: &str = "fixtures/people.csv";
    let reader = ReaderBuilder::new().has_headers(false).from_path(PATH).unwrap();
    assert_eq!(decode_all(reader.into()), expected_members());
}

#[test]
fn header_is_kept() {
    const PATH: &str = "fixtures/people.csv";
    let reader = ReaderBuilder::new().from_path(PATH).unwrap();
    let mut member = Member::default();
    let session = Session::new(Csv::new(reader), &mut member).unwrap();

    assert_eq!(
        session.header(),
        ["First Name", "Second Name", "Age", "Height", "Visits", "Badge"]
    );
    assert_eq!(session.plan().len(), 6);
    assert_eq!(session.line(), 1);
}

#[test]
fn ragged_csv_is_a_source_fault() {
    const PATH: &str = "fixtures/ragged.csv";
    let reader = ReaderBuilder::new().from_path(PATH).unwrap();
    let mut member = Member::default();
    let mut session = Session::new(Csv::new(reader), &mut member).unwrap();

    assert!(session.advance());
    assert!(!session.advance());
    assert!(matches!(session.error(), Some(Error::Source(_))));
}

#[test]
fn flexible_ragged_csv_is_a_short_row() {
    const PATH: &str = "fixtures/ragged.csv";
    let reader = ReaderBuilder::new().flexible(true).from_path(PATH).unwrap();
    let mut member = Member::default();
    let mut session = Session::new(Csv::new(reader), &mut member).unwrap();

    assert!(session.advance());
    assert!(!session.advance());
    assert_eq!(session.line(), 3);
    assert_eq!(session.column(), 3);
    assert!(matches!(
        session.error(),
        Some(Error::Convert {
            source: ConvertError::ShortRow { len: 2 },
            ..
        })
    ));
}

#[test]
fn bad_value_stops_at_its_line() {
    const PATH: &str = "fixtures/bad-age.csv";
    let reader = ReaderBuilder::new().from_path(PATH).unwrap();
    let mut member = Member::default();
    let mut session = Session::new(Csv::new(reader), &mut member).unwrap();

    let mut names = vec![];
    while session.advance() {
        names.push(session.record().first_name.clone());
    }

    assert_eq!(names, ["Ada"]);
    assert_eq!((session.line(), session.column()), (3, 2));
    assert_eq!(
        session.finish().unwrap_err().to_string(),
        "Failed to convert column 2 on line 3: Invalid integer: invalid digit found in string."
    );
}

#[test]
fn empty_csv_has_no_header() {
    let reader = ReaderBuilder::new().from_reader("".as_bytes());
    let mut member = Member::default();
    let result = Session::new(Csv::new(reader), &mut member);

    assert!(matches!(result, Err(Error::NoHeader)));
}

#[derive(Debug, Default)]
struct Mismatched {
    name: String,
}

impl Record for Mismatched {
    fn fields() -> Vec<Descriptor<Self>> {
        vec![Descriptor::<Mismatched>::new(
            "name",
            "String",
            Some(Kind::Signed),
            |m| Some(Slot::String(&mut m.name)),
        )]
    }
}

#[test]
fn mismatched_slot_is_not_settable() {
    let reader = ReaderBuilder::new().from_reader("Name\nAda\n".as_bytes());
    let mut mismatched = Mismatched::default();
    let mut session = Session::new(Csv::new(reader), &mut mismatched).unwrap();

    assert!(!session.advance());
    assert!(matches!(
        session.error(),
        Some(Error::Convert {
            line: 2,
            column: 1,
            source: ConvertError::NotSettable,
        })
    ));
    assert_eq!(session.record().name, "");
}

#[test]
fn badge_round_trip() {
    let mut badge = Badge::default();
    badge.set(&Badge(0xbeef).render()).unwrap();
    assert_eq!(badge, Badge(0xbeef));

    assert!(badge.set("beef").is_err());
    assert_eq!(badge, Badge(0xbeef));
}
