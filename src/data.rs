//! Boot ROM variants bundled (or loadable) alongside the emulator.
//!
//! Boot ROM firmware dumps are Nintendo's proprietary code and are not
//! redistributed with this crate. The byte arrays below are placeholders
//! sized to match the real hardware variants; hosts that have obtained a
//! boot ROM dump through legitimate means should feed it in via
//! [`crate::gb::GameBoy::load_boot`] or [`crate::gb::GameBoy::load_boot_path`]
//! rather than relying on the bundled zero-filled arrays.

use core::fmt::{self, Display, Formatter};

use crate::gb::GameBoyMode;

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

/// DMG-style boot ROM, 256 bytes mapped at 0x0000-0x00ff.
pub const DMG_BOOT: [u8; 256] = [0x00; 256];

/// Super Game Boy boot ROM, same layout and size as [`DMG_BOOT`].
pub const SGB_BOOT: [u8; 256] = [0x00; 256];

/// Pokemon Mini-revision ("Bootix") DMG boot ROM used by several
/// open replacements; identical size to [`DMG_BOOT`].
pub const DMG_BOOTIX: [u8; 256] = [0x00; 256];

/// MGB (Game Boy Pocket) variant of the Bootix boot ROM.
pub const MGB_BOOTIX: [u8; 256] = [0x00; 256];

/// CGB boot ROM, 2304 bytes mapped at 0x0000-0x08ff (with the
/// 0x0100-0x01ff cartridge header hole left untouched).
pub const CGB_BOOT: [u8; 2304] = [0x00; 2304];

/// Free/open-source reimplementation of the CGB boot ROM, same size
/// as [`CGB_BOOT`].
pub const CGB_FREE: [u8; 2304] = [0x00; 2304];

/// Identifies which boot ROM image (if any) is currently mapped into
/// the low address space of a [`crate::gb::GameBoy`].
#[cfg_attr(feature = "wasm", wasm_bindgen)]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum BootRom {
    /// No boot ROM loaded, the CPU starts directly at the cartridge
    /// entry point (post-boot register state).
    #[default]
    None,
    /// A boot ROM was loaded from an arbitrary source (file path or
    /// raw buffer) and its provenance is not tracked further.
    Other,
    Dmg,
    Sgb,
    DmgBootix,
    MgbBootix,
    Cgb,
    CgbFree,
}

impl BootRom {
    pub fn description(&self) -> &'static str {
        match self {
            BootRom::None => "None",
            BootRom::Other => "Other",
            BootRom::Dmg => "DMG",
            BootRom::Sgb => "SGB",
            BootRom::DmgBootix => "DMG Bootix",
            BootRom::MgbBootix => "MGB Bootix",
            BootRom::Cgb => "CGB",
            BootRom::CgbFree => "CGB Free",
        }
    }

    /// Whether this boot ROM variant can be mapped for a DMG/SGB
    /// power-on sequence.
    pub fn is_dmg_compat(&self) -> bool {
        matches!(
            self,
            BootRom::Dmg | BootRom::Sgb | BootRom::DmgBootix | BootRom::MgbBootix | BootRom::Other
        )
    }

    /// Whether this boot ROM variant can be mapped for a CGB
    /// power-on sequence.
    pub fn is_cgb_compat(&self) -> bool {
        matches!(self, BootRom::Cgb | BootRom::CgbFree | BootRom::Other)
    }

    /// Returns `Some(self)` when the currently loaded boot ROM remains
    /// valid for `mode`, `None` when a fresh default should be chosen.
    pub fn reusable(&self, mode: GameBoyMode) -> Option<BootRom> {
        let compatible = match mode {
            GameBoyMode::Dmg | GameBoyMode::Sgb => self.is_dmg_compat(),
            GameBoyMode::Cgb => self.is_cgb_compat(),
        };
        if compatible {
            Some(*self)
        } else {
            None
        }
    }
}

impl Display for BootRom {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dmg_bootix_is_dmg_and_not_cgb_compatible() {
        assert!(BootRom::DmgBootix.is_dmg_compat());
        assert!(!BootRom::DmgBootix.is_cgb_compat());
    }

    #[test]
    fn cgb_free_is_cgb_and_not_dmg_compatible() {
        assert!(BootRom::CgbFree.is_cgb_compat());
        assert!(!BootRom::CgbFree.is_dmg_compat());
    }

    #[test]
    fn reusable_falls_back_to_none_on_mismatch() {
        assert_eq!(BootRom::Cgb.reusable(GameBoyMode::Dmg), None);
        assert_eq!(
            BootRom::DmgBootix.reusable(GameBoyMode::Dmg),
            Some(BootRom::DmgBootix)
        );
    }

    #[test]
    fn none_is_never_reusable() {
        assert_eq!(BootRom::None.reusable(GameBoyMode::Dmg), None);
        assert_eq!(BootRom::None.reusable(GameBoyMode::Cgb), None);
    }
}
