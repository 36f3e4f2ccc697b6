//! Ranked outcome of consuming one grammar element.

/// Outcome of one consumption attempt.
///
/// The derived `Ord` is the ranking used when alternatives compete:
/// `Exception < EmptyMatch < Failure { .. } < Success`, with a failure that
/// reached a higher offset ranking above one that stopped earlier. A branch
/// that got further into the input is the more plausible diagnosis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConsumeOutcome {
    /// An unexpected fault, contained by the root driver.
    Exception,
    /// Matched nothing. Valid for optional and loop bases, minimal among
    /// attempted outcomes.
    EmptyMatch,
    /// Hard mismatch; `offset` is how far the attempt got.
    Failure { offset: usize },
    /// The element matched.
    Success,
}

impl ConsumeOutcome {
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Self::Failure { .. })
    }
}
