//! Candidate time ordering.

use courtbot_protocols::{BookingRequest, TimeOfDay};

/// The times to try, most preferred first.
///
/// Member-only requests use the member list as given. Otherwise the two
/// lists are interleaved pairwise (member *i*, then non-member *i*); once
/// the shorter list runs out the longer one continues alone.
pub fn resolve_order(request: &BookingRequest) -> Vec<TimeOfDay> {
    if request.member_only {
        return request.member_times.clone();
    }

    let member = &request.member_times;
    let non_member = &request.non_member_times;
    let rounds = member.len().max(non_member.len());

    (0..rounds)
        .flat_map(|i| [member.get(i), non_member.get(i)])
        .flatten()
        .copied()
        .collect()
}
