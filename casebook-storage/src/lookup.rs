//! Linear-scan lookups over record slices.
//!
//! Every function here is total: a missing id is `None`, an unmatched key is an
//! empty list. Result order always follows slice order.

use casebook_core::{
    Assessment, AssessmentId, Client, ClientId, EntityType, Note, NoteId, Program, ProgramId,
    Provider, ProviderId, Referral, ReferralId, Service, ServiceId, Task, TaskId, TimeEntry,
    TimeEntryId, User, UserId,
};
use std::collections::HashSet;
use std::hash::Hash;

/// A stored record with a typed primary key.
pub trait Record {
    type Id: Copy + Eq + Hash;

    const ENTITY_TYPE: EntityType;

    fn id(&self) -> Self::Id;
}

macro_rules! impl_record {
    ($type:ty, $id:ty, $entity:ident) => {
        impl Record for $type {
            type Id = $id;

            const ENTITY_TYPE: EntityType = EntityType::$entity;

            fn id(&self) -> $id {
                self.id
            }
        }
    };
}

impl_record!(User, UserId, User);
impl_record!(Client, ClientId, Client);
impl_record!(Program, ProgramId, Program);
impl_record!(Note, NoteId, Note);
impl_record!(Service, ServiceId, Service);
impl_record!(Assessment, AssessmentId, Assessment);
impl_record!(Task, TaskId, Task);
impl_record!(Provider, ProviderId, Provider);
impl_record!(Referral, ReferralId, Referral);
impl_record!(TimeEntry, TimeEntryId, TimeEntry);

/// First record whose id equals `id`.
pub fn find_by_id<R: Record>(records: &[R], id: R::Id) -> Option<&R> {
    records.iter().find(|r| r.id() == id)
}

/// Every record whose `key` equals `value`, in slice order.
pub fn find_all_by_key<R, K, F>(records: &[R], key: F, value: K) -> Vec<&R>
where
    K: PartialEq,
    F: Fn(&R) -> K,
{
    records.iter().filter(|r| key(r) == value).collect()
}

/// Resolve a client's program against the program table.
pub fn join_program<'a>(client: &Client, programs: &'a [Program]) -> Option<&'a Program> {
    client.program_id.and_then(|id| find_by_id(programs, id))
}

/// Program ids referenced by `clients`, deduplicated, first occurrence first.
/// Clients without a program are skipped.
pub fn distinct_program_ids<'c, I>(clients: I) -> Vec<ProgramId>
where
    I: IntoIterator<Item = &'c Client>,
{
    let mut seen = HashSet::new();
    clients
        .into_iter()
        .filter_map(|c| c.program_id)
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Programs referenced by `clients`, deduplicated on id, first occurrence first.
/// Ids with no row in `programs` are skipped.
pub fn distinct_programs<'a, 'c, I>(clients: I, programs: &'a [Program]) -> Vec<&'a Program>
where
    I: IntoIterator<Item = &'c Client>,
{
    distinct_program_ids(clients)
        .into_iter()
        .filter_map(|id| find_by_id(programs, id))
        .collect()
}

/// Distinct provider names in first-occurrence order.
pub fn provider_names<'a, I>(programs: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a Program>,
{
    let mut seen = HashSet::new();
    programs
        .into_iter()
        .map(|p| p.provider.as_str())
        .filter(|name| seen.insert(*name))
        .collect()
}
