/// How progress for one download is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    /// Non-interactive run: nothing is drawn.
    Silent,

    /// Size known up front: a bar against `total` bytes, updated per chunk.
    Determinate { total: u64 },

    /// Size unknown: elapsed time, bytes and throughput on a fixed cadence.
    Indeterminate,
}

impl ProgressMode {
    /// Choose a mode from the raw `Content-Length` header text.
    ///
    /// # Examples
    ///
    /// ```
    /// use fetchline_progress::ProgressMode;
    ///
    /// assert_eq!(ProgressMode::select(Some("1024"), false), ProgressMode::Determinate { total: 1024 });
    /// assert_eq!(ProgressMode::select(None, false), ProgressMode::Indeterminate);
    /// assert_eq!(ProgressMode::select(Some("1024"), true), ProgressMode::Silent);
    /// ```
    pub fn select(content_length: Option<&str>, non_interactive: bool) -> Self {
        if non_interactive {
            return ProgressMode::Silent;
        }

        match content_length.and_then(parse_length) {
            Some(total) => ProgressMode::Determinate { total },
            None => ProgressMode::Indeterminate,
        }
    }

    pub fn is_silent(&self) -> bool {
        matches!(self, ProgressMode::Silent)
    }
}

fn parse_length(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|n| *n > 0)
}
