use crate::error::FsError;

/// Tracks the most specific reason a scan passed over branches.
///
/// Precedence: `NotFound` < `OutOfSpace` < `ReadOnly`. A reason only
/// replaces the current one when it is strictly more specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejection(FsError);

impl Rejection {
    pub fn new() -> Self {
        Rejection(FsError::NotFound)
    }

    pub fn record(&mut self, reason: FsError) {
        if rank(&reason) > rank(&self.0) {
            self.0 = reason;
        }
    }

    pub fn into_error(self) -> FsError {
        self.0
    }
}

impl Default for Rejection {
    fn default() -> Self {
        Self::new()
    }
}

fn rank(err: &FsError) -> u8 {
    match err {
        FsError::ReadOnly => 2,
        FsError::OutOfSpace => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_priority() {
        let mut r = Rejection::new();
        assert_eq!(r.into_error(), FsError::NotFound);

        r.record(FsError::OutOfSpace);
        assert_eq!(r.into_error(), FsError::OutOfSpace);

        r.record(FsError::NotFound);
        assert_eq!(r.into_error(), FsError::OutOfSpace);

        r.record(FsError::ReadOnly);
        assert_eq!(r.into_error(), FsError::ReadOnly);

        r.record(FsError::OutOfSpace);
        r.record(FsError::NotFound);
        assert_eq!(r.into_error(), FsError::ReadOnly);
    }

    #[test]
    fn test_order_of_discovery_does_not_matter() {
        let mut a = Rejection::new();
        a.record(FsError::ReadOnly);
        a.record(FsError::OutOfSpace);

        let mut b = Rejection::new();
        b.record(FsError::OutOfSpace);
        b.record(FsError::ReadOnly);

        assert_eq!(a, b);
    }
}
