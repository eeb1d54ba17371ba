//! Calendar cursor for the delivery date field

use crate::order::is_selectable_delivery_date;
use chrono::{Datelike, Days, Local, Months, NaiveDate, Weekday};
use std::sync::Arc;

/// Source of the current calendar day
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// The local calendar day, read on every call
pub fn local_clock() -> Clock {
    Arc::new(|| Local::now().date_naive())
}

#[cfg(test)]
pub fn fixed_clock(day: NaiveDate) -> Clock {
    Arc::new(move || day)
}

/// Month view with a cursor. Days up to and including today are disabled;
/// today is read from the clock each time, so a session left open past
/// midnight moves the boundary with it.
#[derive(Clone)]
pub struct DatePicker {
    clock: Clock,
    cursor: NaiveDate,
}

impl DatePicker {
    pub fn new(clock: Clock) -> Self {
        let today = clock();
        Self {
            clock,
            cursor: Self::earliest_for(today),
        }
    }

    fn earliest_for(today: NaiveDate) -> NaiveDate {
        today.succ_opt().unwrap_or(today)
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    /// Cursor day, moved forward if the clock has passed it
    pub fn cursor(&self) -> NaiveDate {
        self.cursor.max(self.earliest_selectable())
    }

    /// First day that can be picked
    pub fn earliest_selectable(&self) -> NaiveDate {
        Self::earliest_for(self.today())
    }

    pub fn is_disabled(&self, date: NaiveDate) -> bool {
        !is_selectable_delivery_date(date, self.today())
    }

    /// Put the cursor on an already chosen date
    pub fn show(&mut self, selected: Option<NaiveDate>) {
        if let Some(date) = selected {
            self.set_cursor(date);
        }
    }

    fn set_cursor(&mut self, date: NaiveDate) {
        self.cursor = date.max(self.earliest_selectable());
    }

    pub fn move_days(&mut self, days: i64) {
        let cursor = self.cursor();
        let moved = if days >= 0 {
            cursor.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            cursor.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        if let Some(date) = moved {
            self.set_cursor(date);
        }
    }

    pub fn next_month(&mut self) {
        if let Some(date) = self.cursor().checked_add_months(Months::new(1)) {
            self.set_cursor(date);
        }
    }

    pub fn prev_month(&mut self) {
        if let Some(date) = self.cursor().checked_sub_months(Months::new(1)) {
            self.set_cursor(date);
        }
    }

    /// The cursor date, unless it is disabled
    pub fn select(&self) -> Option<NaiveDate> {
        let cursor = self.cursor();
        (!self.is_disabled(cursor)).then_some(cursor)
    }

    /// Weeks (Monday first) of the cursor's month; days outside it are `None`
    pub fn month_grid(&self) -> Vec<[Option<NaiveDate>; 7]> {
        let Some(first) = self.cursor().with_day(1) else {
            return Vec::new();
        };
        let mut weeks = Vec::new();
        let mut week = [None; 7];
        let mut day = first;
        while day.month() == first.month() {
            let column = day.weekday().num_days_from_monday() as usize;
            week[column] = Some(day);
            if day.weekday() == Weekday::Sun {
                weeks.push(week);
                week = [None; 7];
            }
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }
        if week.iter().any(Option::is_some) {
            weeks.push(week);
        }
        weeks
    }
}
