//! Rex Matching Algorithms
//!
//! Implementations of order matching algorithms for the Rex exchange simulator.

mod book_order;
mod price_priority;

pub use book_order::BookOrderMatcher;
pub use price_priority::PricePriorityMatcher;

// Re-export the trait from ports for convenience
pub use rex_ports::MatchingAlgorithm;

/// Factory function to create matching algorithms by name
pub fn create_matching_algorithm(algorithm_type: &str) -> Box<dyn MatchingAlgorithm> {
    match algorithm_type.to_lowercase().as_str() {
        "price-priority" | "price_priority" => Box::new(PricePriorityMatcher::new()),
        _ => Box::new(BookOrderMatcher::new()), // Default
    }
}
