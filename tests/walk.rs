mod support;

use either::Either::{Left, Right};
use hac4::{
    avec::year::YearGuess,
    sans::{
        NEXT_FREE_POINTER, RAWDATA_OFFSET, Walker,
        addr::RecordAddress,
        bytes::read_u16_le,
        walker::{End, WalkError},
    },
};

use support::{Image, Start, samples};

fn record(data: &[u8], at: RecordAddress) -> [u8; 16] {
    let i = at.image_offset();
    data[i..i + 16].try_into().unwrap()
}

#[test]
fn walk_states_in_order() {
    let mut image = Image::new();
    let records = [
        samples(false, 12, 60, 0xFF, &[(0, 0, 10); 6]),
        samples(true, 12, 0, 0xFF, &[(0, 0, 10)]),
    ];
    let next_free = image.tour(0xFFE0, Start::default(), &records);
    image.next_free(next_free);
    let data = image.finish();

    let next_free = read_u16_le(&data, RAWDATA_OFFSET + NEXT_FREE_POINTER);
    assert_eq!(next_free, 0x160);

    let link = Walker::start(next_free).unwrap();
    let link_at = link.address();
    assert_eq!(link_at.get(), 0x150);

    let Left(start) = link.advance(&record(&data, link_at)).unwrap() else {
        panic!("expected a start record");
    };
    let start_at = start.address();
    assert_eq!(start_at.get(), 0xFFE0);

    let (start_record, samples) = start.advance(&record(&data, start_at)).unwrap();
    assert_eq!(start_record.interval, 10);

    // Sample records continue past the end of the ring buffer.
    let samples_at = samples.address();
    assert_eq!(samples_at.get(), 0xFFF0);
    let (first, successor) = samples.advance(&record(&data, samples_at)).unwrap();
    assert!(!first.is_closing);
    let Left(samples) = successor else {
        panic!("expected another sample record");
    };
    let samples_at = samples.address();
    assert_eq!(samples_at, RecordAddress::FIRST);

    let (last, successor) = samples.advance(&record(&data, samples_at)).unwrap();
    assert!(last.is_closing);
    let Right(closing) = successor else {
        panic!("expected the closing terminal record");
    };
    let closing_at = closing.address();
    assert_eq!(closing_at.get(), 0x150);

    let Left(link) = closing.advance(&record(&data, closing_at)).unwrap() else {
        panic!("expected a link to the preceding tour");
    };
    let link_at = link.address();
    assert_eq!(link_at.get(), 0xFFD0);

    let end = link.advance(&record(&data, link_at)).unwrap();
    assert!(matches!(end, Right(End::Exhausted)));
}

#[test]
fn walk_rejects_pointer_outside_ring() {
    assert_eq!(
        Walker::start(0x0120).unwrap_err(),
        WalkError::InvalidAddress(0x0120)
    );

    let link = Walker::start(0x0150).unwrap();
    let mut terminal = [0; 16];
    terminal[0] = 0xDD;
    terminal[2..4].copy_from_slice(&0x0148u16.to_le_bytes());
    assert_eq!(
        link.advance(&terminal).unwrap_err(),
        WalkError::InvalidAddress(0x0148)
    );
}

#[test]
fn year_guess_steps_back_on_later_month() {
    let mut years = YearGuess::new(2024);
    let guessed: Vec<_> = [3, 11, 9].into_iter().map(|m| years.next(m)).collect();
    assert_eq!(guessed, [2024, 2023, 2023]);

    let mut years = YearGuess::new(2024);
    let guessed: Vec<_> = [12, 12, 1, 7, 2].into_iter().map(|m| years.next(m)).collect();
    assert_eq!(guessed, [2024, 2024, 2024, 2023, 2023]);
}
