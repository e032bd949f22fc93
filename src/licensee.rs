//! Publisher ("licensee") identification from cartridge header bytes.

use core::fmt::{self, Display, Formatter};

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

/// The publisher of a cartridge, decoded from the old licensee byte at
/// 0x014b and, when that byte reads 0x33, the two-character new
/// licensee code at 0x0144-0x0145.
///
/// Only the publishers that show up most often across the commercial
/// DMG/CGB library get a dedicated variant; everything else is kept
/// as its raw code so the value is still round-trippable and
/// printable.
#[cfg_attr(feature = "wasm", wasm_bindgen)]
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Licensee {
    None,
    Nintendo,
    Capcom,
    ElectronicArts,
    Hudsonsoft,
    BAi,
    Kss,
    Pow,
    PCMComplete,
    SanX,
    KemcoJapan,
    Seta,
    Viacom,
    Bandai,
    OceanAcclaim,
    Konami,
    Hector,
    Taito,
    Banpresto,
    UbiSoft,
    Atlus,
    Malibu,
    Angel,
    SpectrumHolobyte,
    Irem,
    Virgin,
    UsGold,
    Absolute,
    Acclaim,
    Activision,
    AmericanSammy,
    Gametek,
    Ljn,
    Matchbox,
    MiltonBradley,
    Titus,
    VirginGames,
    LucasArts,
    Ocean,
    ElectroBrain,
    Infogrames,
    Interplay,
    Broderbund,
    SculpturedSoft,
    SciUs,
    THQ,
    Accolade,
    Microprose,
    Kemco,
    Lozc,
    TokumaShoten,
    TsukudaOriginal,
    Chunsoft,
    Yanoman,
    Nichibutsu,
    Tecmo,
    SquareSoft,
    SonyImagesoft,
    Sammy,
    Varie,
    Kaneko,
    PackInVideo,
    DataEast,
    Koei,
    NCS,
    Human,
    VapInc,
    Epoch,
    Athena,
    AsmikAceEntertainment,
    Natsume,
    KingRecords,
    EpicSonyRecords,
    Igs,
    ToeiAnimation,
    Namco,
    NihonBussan,
    Hal,
    Snk,
    Sunsoft,
    Jaleco,
    Takara,
    Enix,
    UnknownOld(u8),
    UnknownNew(String),
}

impl Licensee {
    /// Decodes the publisher from the old licensee byte, consulting the
    /// new licensee bytes only when the old byte is the 0x33 escape
    /// value used by post-SGB cartridges.
    pub fn from_data(old_code: u8, new_code: &[u8]) -> Self {
        if old_code == 0x33 {
            let code = std::str::from_utf8(new_code).unwrap_or("").trim();
            Self::from_new_code(code)
        } else {
            Self::from_old_code(old_code)
        }
    }

    pub fn from_old_code(code: u8) -> Self {
        match code {
            0x00 => Licensee::None,
            0x01 => Licensee::Nintendo,
            0x08 => Licensee::Capcom,
            0x09 => Licensee::Hudsonsoft,
            0x0a => Licensee::BAi,
            0x0b => Licensee::Kss,
            0x0c => Licensee::Pow,
            0x0d => Licensee::PCMComplete,
            0x0e => Licensee::SanX,
            0x0f => Licensee::KemcoJapan,
            0x18 => Licensee::Hudsonsoft,
            0x19 => Licensee::BAi,
            0x1a => Licensee::Yanoman,
            0x1f => Licensee::Virgin,
            0x24 => Licensee::PCMComplete,
            0x25 => Licensee::SanX,
            0x28 => Licensee::Kemco,
            0x29 => Licensee::Seta,
            0x30 => Licensee::Viacom,
            0x31 => Licensee::Nintendo,
            0x32 => Licensee::Bandai,
            0x33 => Licensee::None,
            0x34 => Licensee::Konami,
            0x35 => Licensee::Hector,
            0x38 => Licensee::Capcom,
            0x39 => Licensee::Banpresto,
            0x41 => Licensee::UbiSoft,
            0x42 => Licensee::Atlus,
            0x44 => Licensee::Malibu,
            0x46 => Licensee::Angel,
            0x47 => Licensee::SpectrumHolobyte,
            0x49 => Licensee::Irem,
            0x4a => Licensee::Virgin,
            0x4f => Licensee::UsGold,
            0x50 => Licensee::Absolute,
            0x51 => Licensee::Acclaim,
            0x52 => Licensee::Activision,
            0x53 => Licensee::AmericanSammy,
            0x54 => Licensee::Gametek,
            0x56 => Licensee::Ljn,
            0x57 => Licensee::Matchbox,
            0x59 => Licensee::MiltonBradley,
            0x5a => Licensee::Titus,
            0x5b => Licensee::VirginGames,
            0x5c => Licensee::LucasArts,
            0x5d => Licensee::Ocean,
            0x5f => Licensee::ElectroBrain,
            0x60 => Licensee::Infogrames,
            0x61 => Licensee::VirginGames,
            0x67 => Licensee::Ocean,
            0x69 => Licensee::ElectronicArts,
            0x6e => Licensee::ElectroBrain,
            0x6f => Licensee::Interplay,
            0x70 => Licensee::Infogrames,
            0x71 => Licensee::Interplay,
            0x72 => Licensee::Broderbund,
            0x73 => Licensee::SculpturedSoft,
            0x75 => Licensee::SciUs,
            0x78 => Licensee::THQ,
            0x79 => Licensee::Accolade,
            0x7c => Licensee::Microprose,
            0x7f => Licensee::Kemco,
            0x83 => Licensee::Lozc,
            0x86 => Licensee::TokumaShoten,
            0x8b => Licensee::TsukudaOriginal,
            0x8c => Licensee::VapInc,
            0x90 => Licensee::Nichibutsu,
            0x91 => Licensee::Chunsoft,
            0x92 => Licensee::Ocean,
            0x93 => Licensee::Ocean,
            0x95 => Licensee::Varie,
            0x97 => Licensee::Kaneko,
            0x99 => Licensee::PackInVideo,
            0x9a => Licensee::NihonBussan,
            0x9d => Licensee::Banpresto,
            0x9f => Licensee::NihonBussan,
            0xa1 => Licensee::Hector,
            0xa4 => Licensee::Konami,
            0xa7 => Licensee::Takara,
            0xaa => Licensee::Broderbund,
            0xac => Licensee::ToeiAnimation,
            0xaf => Licensee::Namco,
            0xb0 => Licensee::Acclaim,
            0xb2 => Licensee::Bandai,
            0xb4 => Licensee::Enix,
            0xb6 => Licensee::Hal,
            0xb7 => Licensee::Snk,
            0xbb => Licensee::Sunsoft,
            0xbd => Licensee::SonyImagesoft,
            0xbf => Licensee::Sammy,
            0xc0 => Licensee::Taito,
            0xc2 => Licensee::Kemco,
            0xc3 => Licensee::SquareSoft,
            0xc5 => Licensee::DataEast,
            0xc8 => Licensee::Koei,
            0xcf => Licensee::Angel,
            0xd0 => Licensee::Taito,
            0xd9 => Licensee::Banpresto,
            0xdd => Licensee::NCS,
            0xde => Licensee::Human,
            0xe0 => Licensee::Jaleco,
            0xe3 => Licensee::Varie,
            0xe5 => Licensee::Epoch,
            0xe7 => Licensee::Athena,
            0xe8 => Licensee::AsmikAceEntertainment,
            0xe9 => Licensee::Natsume,
            0xea => Licensee::KingRecords,
            0xeb => Licensee::Atlus,
            0xec => Licensee::EpicSonyRecords,
            0xee => Licensee::Igs,
            0xff => Licensee::Ljn,
            other => Licensee::UnknownOld(other),
        }
    }

    pub fn from_new_code(code: &str) -> Self {
        match code {
            "00" => Licensee::None,
            "01" => Licensee::Nintendo,
            "08" => Licensee::Capcom,
            "13" => Licensee::ElectronicArts,
            "18" => Licensee::Hudsonsoft,
            "19" => Licensee::BAi,
            "20" => Licensee::KemcoJapan,
            "22" => Licensee::Pow,
            "24" => Licensee::PCMComplete,
            "25" => Licensee::SanX,
            "28" => Licensee::Kemco,
            "29" => Licensee::Seta,
            "30" => Licensee::Viacom,
            "31" => Licensee::Nintendo,
            "32" => Licensee::Bandai,
            "33" => Licensee::OceanAcclaim,
            "34" => Licensee::Konami,
            "35" => Licensee::Hector,
            "37" => Licensee::Taito,
            "38" => Licensee::Capcom,
            "39" => Licensee::Banpresto,
            "41" => Licensee::UbiSoft,
            "42" => Licensee::Atlus,
            "44" => Licensee::Malibu,
            "46" => Licensee::Angel,
            "49" => Licensee::Irem,
            "50" => Licensee::Absolute,
            "51" => Licensee::Acclaim,
            "52" => Licensee::Activision,
            "53" => Licensee::AmericanSammy,
            "54" => Licensee::Konami,
            "56" => Licensee::Ljn,
            "57" => Licensee::Matchbox,
            "59" => Licensee::MiltonBradley,
            "60" => Licensee::Titus,
            "61" => Licensee::VirginGames,
            "64" => Licensee::LucasArts,
            "67" => Licensee::Ocean,
            "69" => Licensee::ElectronicArts,
            "70" => Licensee::Infogrames,
            "71" => Licensee::Interplay,
            "72" => Licensee::Broderbund,
            "73" => Licensee::SculpturedSoft,
            "75" => Licensee::SciUs,
            "78" => Licensee::THQ,
            "79" => Licensee::Accolade,
            "80" => Licensee::MiltonBradley,
            "83" => Licensee::Lozc,
            "86" => Licensee::TokumaShoten,
            "87" => Licensee::TsukudaOriginal,
            "91" => Licensee::Chunsoft,
            "92" => Licensee::Ocean,
            "93" => Licensee::OceanAcclaim,
            "95" => Licensee::Varie,
            "97" => Licensee::Kaneko,
            "99" => Licensee::PackInVideo,
            "a4" => Licensee::Konami,
            other => Licensee::UnknownNew(other.to_string()),
        }
    }

    pub fn description(&self) -> String {
        let name = match self {
            Licensee::None => "None",
            Licensee::Nintendo => "Nintendo",
            Licensee::Capcom => "Capcom",
            Licensee::ElectronicArts => "Electronic Arts",
            Licensee::Hudsonsoft => "Hudson Soft",
            Licensee::BAi => "B-AI",
            Licensee::Kss => "KSS",
            Licensee::Pow => "POW",
            Licensee::PCMComplete => "PCM Complete",
            Licensee::SanX => "San-X",
            Licensee::KemcoJapan => "Kemco Japan",
            Licensee::Seta => "Seta",
            Licensee::Viacom => "Viacom",
            Licensee::Bandai => "Bandai",
            Licensee::OceanAcclaim => "Ocean/Acclaim",
            Licensee::Konami => "Konami",
            Licensee::Hector => "Hector",
            Licensee::Taito => "Taito",
            Licensee::Banpresto => "Banpresto",
            Licensee::UbiSoft => "UbiSoft",
            Licensee::Atlus => "Atlus",
            Licensee::Malibu => "Malibu",
            Licensee::Angel => "Angel",
            Licensee::SpectrumHolobyte => "Spectrum Holobyte",
            Licensee::Irem => "Irem",
            Licensee::Virgin => "Virgin",
            Licensee::UsGold => "US Gold",
            Licensee::Absolute => "Absolute",
            Licensee::Acclaim => "Acclaim",
            Licensee::Activision => "Activision",
            Licensee::AmericanSammy => "American Sammy",
            Licensee::Gametek => "GameTek",
            Licensee::Ljn => "LJN",
            Licensee::Matchbox => "Matchbox",
            Licensee::MiltonBradley => "Milton Bradley",
            Licensee::Titus => "Titus",
            Licensee::VirginGames => "Virgin Games",
            Licensee::LucasArts => "LucasArts",
            Licensee::Ocean => "Ocean",
            Licensee::ElectroBrain => "Electro Brain",
            Licensee::Infogrames => "Infogrames",
            Licensee::Interplay => "Interplay",
            Licensee::Broderbund => "Broderbund",
            Licensee::SculpturedSoft => "Sculptured Soft",
            Licensee::SciUs => "SCI (US)",
            Licensee::THQ => "THQ",
            Licensee::Accolade => "Accolade",
            Licensee::Microprose => "Microprose",
            Licensee::Kemco => "Kemco",
            Licensee::Lozc => "Lozc",
            Licensee::TokumaShoten => "Tokuma Shoten",
            Licensee::TsukudaOriginal => "Tsukuda Original",
            Licensee::Chunsoft => "Chunsoft",
            Licensee::Yanoman => "Yanoman",
            Licensee::Nichibutsu => "Nichibutsu",
            Licensee::Tecmo => "Tecmo",
            Licensee::SquareSoft => "Squaresoft",
            Licensee::SonyImagesoft => "Sony Imagesoft",
            Licensee::Sammy => "Sammy",
            Licensee::Varie => "Varie",
            Licensee::Kaneko => "Kaneko",
            Licensee::PackInVideo => "Pack In Video",
            Licensee::DataEast => "Data East",
            Licensee::Koei => "Koei",
            Licensee::NCS => "NCS",
            Licensee::Human => "Human",
            Licensee::VapInc => "VAP, Inc.",
            Licensee::Epoch => "Epoch",
            Licensee::Athena => "Athena",
            Licensee::AsmikAceEntertainment => "Asmik Ace Entertainment",
            Licensee::Natsume => "Natsume",
            Licensee::KingRecords => "King Records",
            Licensee::EpicSonyRecords => "Epic/Sony Records",
            Licensee::Igs => "IGS",
            Licensee::ToeiAnimation => "Toei Animation",
            Licensee::Namco => "Namco",
            Licensee::NihonBussan => "Nihon Bussan",
            Licensee::Hal => "HAL Laboratory",
            Licensee::Snk => "SNK",
            Licensee::Sunsoft => "Sunsoft",
            Licensee::Jaleco => "Jaleco",
            Licensee::Takara => "Takara",
            Licensee::Enix => "Enix",
            Licensee::UnknownOld(code) => return format!("Unknown (0x{:02x})", code),
            Licensee::UnknownNew(code) => return format!("Unknown ({})", code),
        };
        name.to_string()
    }
}

impl Display for Licensee {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn old_code_nintendo() {
        assert_eq!(Licensee::from_old_code(0x01), Licensee::Nintendo);
    }

    #[test]
    fn escape_code_delegates_to_new_code() {
        let licensee = Licensee::from_data(0x33, b"13");
        assert_eq!(licensee, Licensee::ElectronicArts);
    }

    #[test]
    fn unrecognised_old_code_is_preserved() {
        match Licensee::from_old_code(0x15) {
            Licensee::UnknownOld(code) => assert_eq!(code, 0x15),
            other => panic!("expected UnknownOld, got {:?}", other),
        }
    }

    #[test]
    fn unrecognised_new_code_is_preserved() {
        match Licensee::from_new_code("zz") {
            Licensee::UnknownNew(code) => assert_eq!(code, "zz"),
            other => panic!("expected UnknownNew, got {:?}", other),
        }
    }
}
