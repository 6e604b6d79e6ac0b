use serde::{Deserialize, Serialize};

/// Style selections for one generation request. The enum values are the exact
/// strings the web client sends, and the same strings are interpolated into
/// the model prompt verbatim.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraduationOptions {
    pub school_level: SchoolLevel,
    pub gown_color: GownColor,
    pub background: BackgroundStyle,
    pub confetti: ConfettiType,
    #[serde(default)]
    pub custom_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchoolLevel {
    #[serde(rename = "어린이집/유치원")]
    Kindergarten,
    #[serde(rename = "초등학교")]
    Elementary,
    #[serde(rename = "중학교")]
    Middle,
    #[serde(rename = "고등학교")]
    High,
    #[serde(rename = "대학교")]
    University,
}

impl SchoolLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchoolLevel::Kindergarten => "어린이집/유치원",
            SchoolLevel::Elementary => "초등학교",
            SchoolLevel::Middle => "중학교",
            SchoolLevel::High => "고등학교",
            SchoolLevel::University => "대학교",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GownColor {
    #[serde(rename = "클래식 블랙")]
    Black,
    #[serde(rename = "네이비 블루")]
    Navy,
    #[serde(rename = "버건디 레드")]
    Burgundy,
    #[serde(rename = "화이트 & 골드")]
    WhiteGold,
    #[serde(rename = "스카이 블루")]
    SkyBlue,
    #[serde(rename = "핑크 블러썸")]
    Pink,
}

impl GownColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            GownColor::Black => "클래식 블랙",
            GownColor::Navy => "네이비 블루",
            GownColor::Burgundy => "버건디 레드",
            GownColor::WhiteGold => "화이트 & 골드",
            GownColor::SkyBlue => "스카이 블루",
            GownColor::Pink => "핑크 블러썸",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackgroundStyle {
    #[serde(rename = "화이트 (기본)")]
    White,
    #[serde(rename = "라이트 그레이")]
    LightGray,
    #[serde(rename = "클래식 블루")]
    ClassicBlue,
    #[serde(rename = "소프트 베이지")]
    Beige,
    #[serde(rename = "그라데이션 그레이")]
    GradientGray,
    #[serde(rename = "보케 라이트")]
    Bokeh,
    #[serde(rename = "벨벳 다크")]
    Velvet,
    #[serde(rename = "벚꽃 블러")]
    CherryBlossom,
    #[serde(rename = "풍선 셀레브레이션")]
    Balloons,
    #[serde(rename = "꽃다발 가든")]
    Flowers,
    #[serde(rename = "라벤더")]
    Lavender,
    #[serde(rename = "세이지 그린")]
    Sage,
    #[serde(rename = "피치")]
    Peach,
    #[serde(rename = "밀레니얼 핑크")]
    PinkMillennial,
}

impl BackgroundStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackgroundStyle::White => "화이트 (기본)",
            BackgroundStyle::LightGray => "라이트 그레이",
            BackgroundStyle::ClassicBlue => "클래식 블루",
            BackgroundStyle::Beige => "소프트 베이지",
            BackgroundStyle::GradientGray => "그라데이션 그레이",
            BackgroundStyle::Bokeh => "보케 라이트",
            BackgroundStyle::Velvet => "벨벳 다크",
            BackgroundStyle::CherryBlossom => "벚꽃 블러",
            BackgroundStyle::Balloons => "풍선 셀레브레이션",
            BackgroundStyle::Flowers => "꽃다발 가든",
            BackgroundStyle::Lavender => "라벤더",
            BackgroundStyle::Sage => "세이지 그린",
            BackgroundStyle::Peach => "피치",
            BackgroundStyle::PinkMillennial => "밀레니얼 핑크",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfettiType {
    #[serde(rename = "없음")]
    None,
    #[serde(rename = "골드")]
    Gold,
    #[serde(rename = "실버")]
    Silver,
    #[serde(rename = "파스텔")]
    Pastel,
    #[serde(rename = "홀로그램")]
    Hologram,
}

impl ConfettiType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfettiType::None => "없음",
            ConfettiType::Gold => "골드",
            ConfettiType::Silver => "실버",
            ConfettiType::Pastel => "파스텔",
            ConfettiType::Hologram => "홀로그램",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ConfettiType::None)
    }
}
