use std::collections::VecDeque;

use crate::lexer::tokens::{Token, TokenKind};

/// A fixed-size window over the upcoming tokens of a one-directional source.
///
/// The window is refilled after every `next()`. Once an `EOF` token has been
/// buffered the source is not polled again.
pub struct LookaheadWindow<I: Iterator<Item = Token>> {
    source: I,
    buffer: VecDeque<Token>,
    capacity: usize,
    exhausted: bool,
}

impl<I: Iterator<Item = Token>> LookaheadWindow<I> {
    /// Creates the window and eagerly fills it. A capacity of 0 is treated as 1.
    pub fn new(source: I, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut window = LookaheadWindow {
            source,
            buffer: VecDeque::with_capacity(capacity),
            capacity,
            exhausted: false,
        };

        window.fill();
        window
    }

    fn fill(&mut self) {
        while !self.exhausted && self.buffer.len() < self.capacity {
            match self.source.next() {
                Some(token) => {
                    self.exhausted = token.kind == TokenKind::EOF;
                    self.buffer.push_back(token);
                }
                None => self.exhausted = true,
            }
        }
    }

    /// Removes the oldest buffered token. `None` once buffer and source are both drained.
    pub fn next(&mut self) -> Option<Token> {
        let token = self.buffer.pop_front();
        self.fill();
        token
    }

    /// Looks at the token `i` positions ahead without consuming anything.
    pub fn peek(&self, i: usize) -> Option<&Token> {
        self.buffer.get(i)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
