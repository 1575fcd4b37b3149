// A poisoned lock means another thread panicked while mutating pool state. We cannot tell
// which instances were half-returned, so continuing could hand stale data to a new borrower.
pub(crate) const ERR_POISONED_LOCK: &str = "encountered poisoned lock - continued execution \
    is not safe because we can no longer ensure that pooled instances are not shared";

pub(crate) const ERR_LEASE_DISPOSED: &str =
    "request lease payload accessed after the lease was disposed";
