const PAGE_STEP: usize = 5;

pub const fn wrap_decrement(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

pub const fn wrap_increment(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    (index + 1) % len
}

/// Move `index` by one page without wrapping.
pub fn page(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }

    if forward {
        (index + PAGE_STEP).min(len - 1)
    } else {
        index.saturating_sub(PAGE_STEP)
    }
}
