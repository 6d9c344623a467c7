use std::net::Ipv4Addr;
use std::time::Duration;

use fxhash::FxHashMap;

use crate::interface::MacAddress;
use crate::ip::Ipv4Packet;

/// Lifetimes of the two record kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArpConfig {
    /// How long an unanswered request suppresses re-requests.
    pub pending_timeout: Duration,
    /// How long a resolved mapping stays valid.
    pub entry_timeout: Duration,
}

impl Default for ArpConfig {
    fn default() -> Self {
        Self {
            pending_timeout: Duration::from_millis(5_000),
            entry_timeout: Duration::from_millis(30_000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ArpEntry {
    mac: MacAddress,
    age: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ArpPending {
    age: Duration,
    queue: Vec<Ipv4Packet>,
}

/// The timed next-hop resolution cache.
///
/// Resolved mappings and pending requests age only through [`tick`]; both are
/// evicted once their age reaches the configured lifetime (strict `>=`). A
/// pending record that expires takes its queued datagrams with it, the next
/// send for that destination starts over with a fresh request.
///
/// [`tick`]: ArpTable::tick
#[derive(Debug)]
pub struct ArpTable {
    map: FxHashMap<Ipv4Addr, ArpEntry>,
    pending: FxHashMap<Ipv4Addr, ArpPending>,
    config: ArpConfig,
}

impl ArpTable {
    pub fn new(config: ArpConfig) -> Self {
        Self {
            map: FxHashMap::default(),
            pending: FxHashMap::default(),
            config,
        }
    }

    /// The link address of `ip`, if a live mapping exists.
    pub fn lookup(&self, ip: &Ipv4Addr) -> Option<MacAddress> {
        self.map.get(ip).map(|entry| entry.mac)
    }

    /// Inserts or refreshes the mapping `ip -> mac` and hands back every
    /// datagram that was queued waiting for it.
    #[must_use]
    pub fn add(&mut self, ip: Ipv4Addr, mac: MacAddress) -> Vec<Ipv4Packet> {
        self.map.insert(
            ip,
            ArpEntry {
                mac,
                age: Duration::ZERO,
            },
        );
        let flushed = self
            .pending
            .remove(&ip)
            .map(|record| record.queue)
            .unwrap_or_default();
        log::trace!(
            target: "minnet/arp",
            "learned {ip} is {mac} (flushing {} datagrams)",
            flushed.len()
        );
        flushed
    }

    /// Whether a request for `ip` is already in flight.
    pub fn active_lookup(&self, ip: &Ipv4Addr) -> bool {
        self.pending.contains_key(ip)
    }

    /// Queues `pkt` until `ip` resolves, creating the pending record if none
    /// is live. The caller broadcasts the actual request exactly when
    /// [`active_lookup`](ArpTable::active_lookup) was false beforehand.
    pub fn wait_for(&mut self, ip: Ipv4Addr, pkt: Ipv4Packet) {
        self.pending
            .entry(ip)
            .or_insert_with(|| ArpPending {
                age: Duration::ZERO,
                queue: Vec::new(),
            })
            .queue
            .push(pkt);
    }

    /// Ages every record by `elapsed` and evicts the expired ones.
    pub fn tick(&mut self, elapsed: Duration) {
        let entry_timeout = self.config.entry_timeout;
        self.map.retain(|ip, entry| {
            entry.age += elapsed;
            let keep = entry.age < entry_timeout;
            if !keep {
                log::trace!(target: "minnet/arp", "mapping for {ip} expired");
            }
            keep
        });

        let pending_timeout = self.config.pending_timeout;
        self.pending.retain(|ip, record| {
            record.age += elapsed;
            let keep = record.age < pending_timeout;
            if !keep {
                log::trace!(
                    target: "minnet/arp",
                    "request for {ip} expired, discarding {} queued datagrams",
                    record.queue.len()
                );
            }
            keep
        });
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
