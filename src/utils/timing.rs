//! Run-time measurement utilities
//!
//! Wraps the browser's monotonic `performance.now()` clock, falling back to
//! the wall clock when the Performance API is unavailable.

/// Milliseconds since an arbitrary origin
pub fn now_ms() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        chrono::Utc::now().timestamp_millis() as f64
    }
}

/// Elapsed-time measurement for one run
pub struct Timer {
    started_at: f64,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            started_at: now_ms(),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        now_ms() - self.started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_non_negative() {
        let timer = Timer::start();
        assert!(timer.elapsed_ms() >= 0.0);
    }
}
