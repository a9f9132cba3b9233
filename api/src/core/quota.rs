use dashmap::DashMap;

/// Fixed per-client audit allowance, counted for the lifetime of the process.
///
/// Check and increment happen while the client's entry is locked, so
/// concurrent requests from the same client can never pass the limit together.
#[derive(Debug)]
pub struct AuditQuota {
    limit: u32,
    used: DashMap<String, u32>,
}

impl AuditQuota {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            used: DashMap::new(),
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Consumes one audit for `client`. Returns `false` once the allowance is
    /// used up; rejected attempts are not counted.
    pub fn try_acquire(&self, client: &str) -> bool {
        let mut count = self.used.entry(client.to_string()).or_insert(0);
        if *count >= self.limit {
            return false;
        }
        *count += 1;
        true
    }

    /// Audits already consumed by `client`.
    pub fn used(&self, client: &str) -> u32 {
        self.used.get(client).map(|count| *count).unwrap_or(0)
    }
}
