//! Address-bar access and authorization-code cleanup.
//!
//! SYSTEM CONTEXT
//! ==============
//! After the code exchange the identity provider leaves `code`, `state` and
//! `session_state` in the query string. They are removed in place so a reload
//! or a shared link never replays a stale exchange.

#[cfg(test)]
#[path = "address_test.rs"]
mod address_test;

/// Read/replace access to the visible address.
pub trait AddressBar {
    /// Current path, query and fragment (e.g. `/movies?code=1#top`).
    fn current(&self) -> Option<String>;

    /// Swap the visible address without adding a history entry.
    fn replace(&self, address: &str);
}

/// Remove `params` from the query of `address`.
///
/// Returns `None` when nothing was removed so callers can skip the write.
#[must_use]
pub fn strip_auth_params(address: &str, params: &[String]) -> Option<String> {
    let (before_hash, hash) = match address.find('#') {
        Some(idx) => address.split_at(idx),
        None => (address, ""),
    };
    let (path, query) = match before_hash.find('?') {
        Some(idx) => (&before_hash[..idx], &before_hash[idx + 1..]),
        None => return None,
    };

    let mut removed = false;
    let kept: Vec<&str> = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| {
            let key = pair.split('=').next().unwrap_or_default();
            let drop = params.iter().any(|p| p == key);
            removed |= drop;
            !drop
        })
        .collect();

    if !removed {
        return None;
    }

    let mut next = path.to_owned();
    if !kept.is_empty() {
        next.push('?');
        next.push_str(&kept.join("&"));
    }
    next.push_str(hash);
    Some(next)
}

/// Strip auth params from the live address bar. Returns whether it changed.
pub fn sanitize(address_bar: &dyn AddressBar, params: &[String]) -> bool {
    let Some(current) = address_bar.current() else {
        return false;
    };
    match strip_auth_params(&current, params) {
        Some(next) => {
            log::debug!("removing auth params from address");
            address_bar.replace(&next);
            true
        }
        None => false,
    }
}
