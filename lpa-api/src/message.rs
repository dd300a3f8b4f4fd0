/// Messages delivered to one vertex in one superstep.
///
/// The iterator is handed to the update function by value and can be walked
/// exactly once; it is deliberately not `Clone`.
pub struct MessageIterator<M> {
    inner: std::vec::IntoIter<M>,
}

impl<M> MessageIterator<M> {
    pub fn new(messages: Vec<M>) -> Self {
        Self {
            inner: messages.into_iter(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

impl<M> Iterator for MessageIterator<M> {
    type Item = M;

    fn next(&mut self) -> Option<M> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<M> ExactSizeIterator for MessageIterator<M> {}
