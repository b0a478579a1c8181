// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0

//! Anchorage: a bezier path model with a legacy point-array codec

fn main() -> anyhow::Result<()> {
    anchorage::run()
}
