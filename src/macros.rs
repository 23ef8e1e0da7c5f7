//===========================================================================//

macro_rules! fail {
    ($err:expr) => {{
        let error: $crate::error::FormatError = $err;
        ::log::debug!("{}", error);
        return Err(error);
    }};
}

macro_rules! ensure_len {
    ($data:expr, $needed:expr) => {{
        let needed: u64 = $needed;
        if ($data.len() as u64) < needed {
            fail!($crate::error::FormatError::truncated(needed, $data.len()));
        }
    }};
}

//===========================================================================//
