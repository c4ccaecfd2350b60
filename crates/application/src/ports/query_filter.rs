use ferrous_resolver_domain::Message;

/// Decides whether a parsed query may be resolved.
pub trait QueryFilter: Send + Sync {
    fn permits(&self, query: &Message) -> bool;
}

impl<F> QueryFilter for F
where
    F: Fn(&Message) -> bool + Send + Sync,
{
    fn permits(&self, query: &Message) -> bool {
        self(query)
    }
}
