//! Jobs table (C3).
//!
//! An ordered, insertion-order collection of [`Job`]s with the small set of
//! lookups the launcher, reaper, and built-ins need. `jid` allocation is
//! monotonic and resets to 1 once the table drains, so an interactive
//! session doesn't accumulate ever-larger job numbers.

use nix::unistd::Pid;

use crate::job::{Jid, Job};

#[derive(Debug, Default)]
pub struct JobsTable {
    jobs: Vec<Job>,
    next_jid: Jid,
}

impl JobsTable {
    pub fn new() -> JobsTable {
        JobsTable {
            jobs: Vec::new(),
            next_jid: 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Job> {
        self.jobs.iter_mut()
    }

    /// Next jid to hand out: one more than the largest currently live, or 1
    /// if the table is empty.
    pub fn allocate_jid(&mut self) -> Jid {
        let jid = self.next_jid;
        self.next_jid += 1;
        jid
    }

    /// Reset the allocator to 1 if the table has drained. Called by the REPL
    /// after each sweep/notification pass.
    pub fn reset_jid_if_empty(&mut self) {
        if self.jobs.is_empty() {
            self.next_jid = 1;
        }
    }

    pub fn insert(&mut self, job: Job) {
        debug_assert!(self.find_by_jid(job.jid).is_none());
        self.jobs.push(job);
    }

    pub fn remove(&mut self, jid: Jid) -> Option<Job> {
        let pos = self.jobs.iter().position(|j| j.jid == jid)?;
        Some(self.jobs.remove(pos))
    }

    pub fn find_by_jid(&self, jid: Jid) -> Option<&Job> {
        self.jobs.iter().find(|j| j.jid == jid)
    }

    pub fn find_by_jid_mut(&mut self, jid: Jid) -> Option<&mut Job> {
        self.jobs.iter_mut().find(|j| j.jid == jid)
    }

    pub fn find_by_pgrp_mut(&mut self, pgrp: Pid) -> Option<&mut Job> {
        self.jobs.iter_mut().find(|j| j.pgrp == pgrp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::{Command, Job};

    fn dummy_job() -> Job {
        Job::new(vec![Command::new(vec!["true".to_string()])], false)
    }

    #[test]
    fn jid_allocation_starts_at_one() {
        let mut table = JobsTable::new();
        assert_eq!(table.allocate_jid(), 1);
        assert_eq!(table.allocate_jid(), 2);
    }

    #[test]
    fn jid_resets_when_table_drains() {
        let mut table = JobsTable::new();
        let mut job = dummy_job();
        job.jid = table.allocate_jid();
        table.insert(job);
        assert_eq!(table.allocate_jid(), 2);

        table.remove(1);
        table.reset_jid_if_empty();
        assert_eq!(table.allocate_jid(), 1);
    }

    #[test]
    fn find_by_jid_round_trips() {
        let mut table = JobsTable::new();
        let mut job = dummy_job();
        job.jid = table.allocate_jid();
        let jid = job.jid;
        table.insert(job);

        assert!(table.find_by_jid(jid).is_some());
        assert!(table.find_by_jid(jid + 1).is_none());
    }

    #[test]
    fn remove_drops_job_from_iteration() {
        let mut table = JobsTable::new();
        let mut job = dummy_job();
        job.jid = table.allocate_jid();
        let jid = job.jid;
        table.insert(job);

        table.remove(jid);
        assert!(table.is_empty());
        assert_eq!(table.iter().count(), 0);
    }
}
