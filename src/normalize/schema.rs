//! Field keys of the upstream reading JSON schema.
//!
//! Keys are fixed by the prompts sent to the upstream service and do not
//! change with the display locale.

/// Advisory note (both schemas)
pub const NOTE: &str = "luuY";
/// Upstream-declared error
pub const ERROR: &str = "error";
/// Upstream-declared error message
pub const MESSAGE: &str = "message";

/// Basic: overview
pub const OVERVIEW: &str = "tongQuan";
/// Basic: highlights
pub const HIGHLIGHTS: &str = "diemNoiBat";

/// Detailed: general introduction
pub const INTRODUCTION: &str = "gioiThieuChung";
/// Detailed: stems and lunar calendar
pub const STEMS_AND_CALENDAR: &str = "canChiVaLichAm";
/// Detailed: sound element and polarity
pub const ELEMENT_AND_POLARITY: &str = "napAmAmDuongMang";
/// Detailed: fixed factors
pub const FIXED_FACTORS: &str = "yeuToCoDinh";
/// Detailed: life and body palaces
pub const PALACES: &str = "cungMenhThan";
/// Detailed: main stars
pub const MAIN_STARS: &str = "saoChinhVaYnghia";
/// Detailed: grouped destiny overview object
pub const DESTINY_OVERVIEW: &str = "vanMenhTongQuan";
/// Destiny overview: career
pub const CAREER: &str = "congDanh";
/// Destiny overview: wealth
pub const WEALTH: &str = "taiLoc";
/// Destiny overview: relationships
pub const RELATIONSHIPS: &str = "tinhDuyen";
/// Destiny overview: health
pub const HEALTH: &str = "sucKhoe";
/// Detailed: conclusion and advice
pub const CONCLUSION: &str = "ketLuanVaLoiKhuyen";

/// Required fields of the basic schema.
pub const BASIC_REQUIRED: [&str; 2] = [OVERVIEW, HIGHLIGHTS];

/// Required fields of the detailed schema.
pub const DETAILED_REQUIRED: [&str; 4] = [
    INTRODUCTION,
    STEMS_AND_CALENDAR,
    ELEMENT_AND_POLARITY,
    DESTINY_OVERVIEW,
];
