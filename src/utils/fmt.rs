//! ## fmt
//!
//! format utilities

/**
 * MIT License
 *
 * remoteio - Copyright (c) 2021 Christian Visintin
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */
use chrono::{DateTime, Utc};
use std::time::SystemTime;

/// Format of the time column of a detailed listing
pub const LS_TIME_FMT: &str = "%Y-%m-%d %H:%M";

/// Format time using fmt string in utc time
pub fn fmt_time_utc(time: SystemTime, fmt: &str) -> String {
    let datetime: DateTime<Utc> = time.into();
    format!("{}", datetime.format(fmt))
}

/// Format the time column of a detailed listing.
/// A missing time is rendered as blanks, so the following columns stay aligned.
pub fn fmt_ls_time(time: Option<SystemTime>) -> String {
    match time {
        Some(time) => fmt_time_utc(time, LS_TIME_FMT),
        None => " ".repeat(16),
    }
}

/// Format an optional numeric id (uid, gid) for a detailed listing
pub fn fmt_id(id: Option<u32>) -> String {
    id.map(|x| x.to_string()).unwrap_or_else(|| "-".to_string())
}
