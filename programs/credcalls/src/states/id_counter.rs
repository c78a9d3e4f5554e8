use crate::error::ErrorCode;
use anchor_lang::prelude::*;

/// PDA seed string used to derive the trade call ID counter.
pub const ID_COUNTER_SEED: &str = "id_counter";

/// Monotonic source of trade call IDs.
///
/// `value` is the ID the next trade call receives; the counter starts at
/// zero, so the first trade call has ID 0. The discriminator is the one
/// published for the `IDCounter` account name, which off-chain readers
/// already decode.
#[account(discriminator = [88, 91, 18, 15, 88, 144, 63, 29])]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct IdCounter {
    pub value: u64,
}

impl IdCounter {
    /// 8 discriminator + 8 value.
    pub const LEN: usize = 8 + 8;

    /// Hands out `value` as the new ID and moves the counter past it.
    /// The trade call PDA is derived from `value` before this is called.
    pub fn advance(&mut self) -> Result<u64> {
        let id = self.value;
        self.value = id.checked_add(1).ok_or(ErrorCode::ArithmeticError)?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::Discriminator;
    use quickcheck::quickcheck;

    #[test]
    fn test_first_id_is_zero() {
        let mut counter = IdCounter::default();
        assert_eq!(counter.value, 0);
        assert_eq!(counter.advance().unwrap(), 0);
        assert_eq!(counter.value, 1);
        assert_eq!(counter.advance().unwrap(), 1);
        assert_eq!(counter.value, 2);
    }

    #[test]
    fn test_advance_overflow() {
        let mut counter = IdCounter { value: u64::MAX };
        assert_eq!(
            counter.advance().unwrap_err(),
            ErrorCode::ArithmeticError.into()
        );
        assert_eq!(counter.value, u64::MAX);
    }

    #[test]
    fn test_discriminator_matches_published_name() {
        assert_eq!(IdCounter::DISCRIMINATOR, &[88, 91, 18, 15, 88, 144, 63, 29]);
    }

    quickcheck! {
        fn qc_ids_strictly_increase(start: u32, calls: u8) -> bool {
            let mut counter = IdCounter { value: start as u64 };
            let mut last: Option<u64> = None;
            for _ in 0..calls {
                let expected = counter.value;
                let id = match counter.advance() {
                    Ok(id) => id,
                    Err(_) => return false,
                };
                if id != expected || last.map_or(false, |prev| id <= prev) {
                    return false;
                }
                last = Some(id);
            }
            true
        }
    }
}
