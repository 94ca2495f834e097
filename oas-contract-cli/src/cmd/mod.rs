// Copyright 2025 Oxide Computer Company

pub(crate) mod check;
pub(crate) mod dispatch;
