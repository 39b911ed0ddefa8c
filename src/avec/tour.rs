//! Assembly of tours from their start and sample records.

use alloc::vec::Vec;

use chrono::{NaiveDate, NaiveDateTime};

use crate::sans::{
    record::{SampleRecord, StartRecord},
    slice::SliceDelta,
};

/// The start of a tour, as recorded by the device plus the guessed year.
///
/// Fields are stored as found. Use [`StartTime::to_datetime`] to obtain a
/// checked timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StartTime {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

impl StartTime {
    /// The start as a timestamp, if the recorded fields form a valid date and
    /// time.
    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month.into(), self.day.into())?
            .and_hms_opt(self.hour.into(), self.minute.into(), 0)
    }
}

/// One sampling interval of a tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSlice {
    /// Seconds since the previous slice.
    pub elapsed: u16,
    /// Pulse at the end of the slice, in beats per minute.
    pub pulse: i32,
    /// Altitude at the end of the slice, in metres.
    pub altitude: i32,
    pub pulse_delta: i16,
    pub altitude_delta: i16,
    /// Distance covered during the slice, in metres.
    pub distance: u16,
    /// Temperature, in degrees Celsius.
    pub temperature: i8,
    pub cadence: u8,
    pub marker: Option<u8>,
}

/// A decoded tour.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    pub start: StartTime,
    /// Recording profile selected on the device.
    pub profile: u8,
    /// Sampling interval, in seconds.
    pub interval: u16,
    /// Odometer reading at the start of the tour, in metres.
    pub start_distance: u32,
    /// Total recording time, in seconds.
    pub recording_time: u32,
    /// Total distance, in metres.
    pub distance: u32,
    /// Cumulative altitude gained, in metres.
    pub ascent: u32,
    /// Cumulative altitude lost, in metres.
    pub descent: u32,
    /// Time slices, beginning with the state at the start of the tour.
    pub slices: Vec<TimeSlice>,
}

/// Running totals while a tour is assembled.
#[derive(Debug, Clone, Copy)]
struct Assembly {
    pulse: i32,
    altitude: i32,
    recording_time: u32,
    distance: u32,
    ascent: u32,
    descent: u32,
}

impl Assembly {
    fn apply(&mut self, delta: SliceDelta, elapsed: u16) {
        self.pulse += i32::from(delta.pulse);
        self.altitude += i32::from(delta.altitude);
        self.recording_time += u32::from(elapsed);
        self.distance += u32::from(delta.distance);

        if delta.altitude > 0 {
            self.ascent += u32::from(delta.altitude.unsigned_abs());
        } else {
            self.descent += u32::from(delta.altitude.unsigned_abs());
        }
    }
}

/// Accumulates the sample records of one tour.
#[derive(Debug)]
pub struct TourAssembler {
    tour: Tour,
    totals: Assembly,
}

impl TourAssembler {
    /// Begin a tour from its start record, dated to `year`.
    pub fn new(start: &StartRecord, year: i32) -> Self {
        Self {
            tour: Tour {
                start: StartTime {
                    year,
                    month: start.month,
                    day: start.day,
                    hour: start.hour,
                    minute: start.minute,
                },
                profile: start.profile,
                interval: start.interval,
                start_distance: start.distance,
                recording_time: 0,
                distance: 0,
                ascent: 0,
                descent: 0,
                slices: Vec::new(),
            },
            totals: Assembly {
                pulse: start.pulse.into(),
                altitude: start.altitude.into(),
                recording_time: 0,
                distance: 0,
                ascent: 0,
                descent: 0,
            },
        }
    }

    /// Add the time slices of the tour's next sample record.
    pub fn add_record(&mut self, record: &SampleRecord) {
        let interval = self.tour.interval;

        if self.tour.slices.is_empty() {
            // The series opens with the state at the start of the tour.
            self.tour.slices.push(TimeSlice {
                elapsed: 0,
                pulse: self.totals.pulse,
                altitude: self.totals.altitude,
                pulse_delta: 0,
                altitude_delta: 0,
                distance: 0,
                temperature: record.temperature,
                cadence: record.cadence,
                marker: None,
            });
        }

        let count = record.slice_count(interval);

        for (i, &packed) in record.slices[..count].iter().enumerate() {
            let delta = SliceDelta::decode(packed);

            let elapsed = if record.is_closing && i + 1 == count {
                record.closing_remainder()
            } else {
                interval
            };

            self.totals.apply(delta, elapsed);

            self.tour.slices.push(TimeSlice {
                elapsed,
                pulse: self.totals.pulse,
                altitude: self.totals.altitude,
                pulse_delta: delta.pulse,
                altitude_delta: delta.altitude,
                distance: delta.distance,
                temperature: record.temperature,
                cadence: record.cadence,
                marker: if i == 0 { record.marker } else { None },
            });
        }
    }

    /// Complete the tour.
    pub fn finish(self) -> Tour {
        let Assembly {
            recording_time,
            distance,
            ascent,
            descent,
            ..
        } = self.totals;

        Tour {
            recording_time,
            distance,
            ascent,
            descent,
            ..self.tour
        }
    }
}
