//! Shininess checks and the PID correction applied against the real trainer.

use crate::tables::ShinyDirective;

/// XOR of the two 16-bit halves.
#[inline]
pub fn fold(x: u32) -> u32 {
    (x & 0xFFFF) ^ (x >> 16)
}

#[inline]
pub fn is_shiny(pid: u32, id: u32) -> bool {
    fold(pid ^ id) < 0x10
}

/// Correct a PID rolled against the fake id so that its shininess against
/// `real_id` matches what the directive (and, when natural, the roll) wants.
pub fn correct_pid(pid: u32, fake_id: u32, real_id: u32, directive: ShinyDirective) -> u32 {
    let should_be_shiny = match directive {
        ShinyDirective::Forced => true,
        ShinyDirective::Locked => false,
        ShinyDirective::Random => is_shiny(pid, fake_id),
    };
    let shiny_now = is_shiny(pid, real_id);
    if should_be_shiny && !shiny_now {
        // keep the fake roll's square/star distinction
        let square = u32::from(fold(pid ^ fake_id) != 0);
        let low = pid & 0xFFFF;
        let high = (real_id & 0xFFFF) ^ (real_id >> 16) ^ low ^ square;
        (high << 16) | low
    } else if !should_be_shiny && shiny_now {
        pid ^ 0x1000_0000
    } else {
        pid
    }
}
