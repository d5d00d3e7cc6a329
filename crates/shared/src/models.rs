use serde::{Deserialize, Deserializer, Serialize};

use crate::calc;

/// Pin position used when the backend has not placed a marker yet.
pub const DEFAULT_PIN_PERCENT: f64 = 50.0;

/// Width/height of the currently observable drawing area, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VisibleSize {
    pub width: f64,
    pub height: f64,
}

impl VisibleSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A size the engine cannot lay out against (zero, negative or non-finite).
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}

/// Fixed dimensions of the background surface, in content-space pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContentSize {
    pub width: f64,
    pub height: f64,
}

impl ContentSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Swap the axes (a quarter turn of the surface).
    pub fn transposed(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

/// Legal pan range for one scale. Derived on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanBoundary {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl PanBoundary {
    /// Clamp a pan offset into the boundary.
    pub fn clamp(&self, x: f64, y: f64) -> (f64, f64) {
        (x.clamp(self.min_x, self.max_x), y.clamp(self.min_y, self.max_y))
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }

    /// True when there is no room to pan horizontally.
    pub fn x_locked(&self) -> bool {
        self.min_x == 0.0 && self.max_x == 0.0
    }

    /// True when there is no room to pan vertically.
    pub fn y_locked(&self) -> bool {
        self.min_y == 0.0 && self.max_y == 0.0
    }
}

/// Scale, pan and rotation of the content box.
///
/// Pan is measured in screen pixels from the centred position; rotation is in
/// degrees and always a multiple of 90.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportState {
    pub scale: f64,
    pub pan_x: f64,
    pub pan_y: f64,
    pub rotation: i32,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            rotation: 0,
        }
    }
}

impl ViewportState {
    /// CSS transform for a content box centred with `left: 50%; top: 50%` and
    /// `transform-origin: center center`.
    pub fn css_transform(&self) -> String {
        format!(
            "translate3d(calc(-50% + {}px), calc(-50% + {}px), 0) scale({}) rotate({}deg)",
            self.pan_x, self.pan_y, self.scale, self.rotation
        )
    }
}

// ---------------------------------------------------------------------------
// Markers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarkerCategory {
    Cafe,
    Bar,
    ChineseRestaurant,
    JapaneseRestaurant,
    SouthAsianRestaurant,
    WesternRestaurant,
    VegetarianRestaurant,
    HalalRestaurant,
    HealthyRestaurant,
    ThaiRestaurant,
    #[serde(other)]
    Other,
}

impl MarkerCategory {
    pub const ALL: [MarkerCategory; 10] = [
        MarkerCategory::Cafe,
        MarkerCategory::Bar,
        MarkerCategory::ChineseRestaurant,
        MarkerCategory::JapaneseRestaurant,
        MarkerCategory::SouthAsianRestaurant,
        MarkerCategory::WesternRestaurant,
        MarkerCategory::VegetarianRestaurant,
        MarkerCategory::HalalRestaurant,
        MarkerCategory::HealthyRestaurant,
        MarkerCategory::ThaiRestaurant,
    ];

    /// Pin icon for the category. Every pin is drawn at the same size.
    pub fn pin_icon(self) -> &'static str {
        match self {
            MarkerCategory::Cafe => "/assets/pins/Pin_Cafe.png",
            MarkerCategory::Bar => "/assets/pins/Pin_Bar.png",
            MarkerCategory::ChineseRestaurant => "/assets/pins/Pin_Restaurant_Chinese.png",
            MarkerCategory::JapaneseRestaurant => "/assets/pins/Pin_Restaurant_Japanese.png",
            MarkerCategory::SouthAsianRestaurant => "/assets/pins/Pin_Restaurant_SouthAsian.png",
            MarkerCategory::WesternRestaurant => "/assets/pins/Pin_Restaurant_Western.png",
            MarkerCategory::VegetarianRestaurant => "/assets/pins/Pin_Restaurant_Vegan.png",
            MarkerCategory::HalalRestaurant => "/assets/pins/Pin_Restaurant_Halal.png",
            MarkerCategory::HealthyRestaurant => "/assets/pins/Pin_Restaurant_Healthy.png",
            MarkerCategory::ThaiRestaurant => "/assets/pins/Pin_Restaurant_Thai.png",
            MarkerCategory::Other => "/assets/pins/Pin_Default.png",
        }
    }
}

impl std::fmt::Display for MarkerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MarkerCategory::Cafe => "Cafe",
            MarkerCategory::Bar => "Bar",
            MarkerCategory::ChineseRestaurant => "Chinese Restaurant",
            MarkerCategory::JapaneseRestaurant => "Japanese Restaurant",
            MarkerCategory::SouthAsianRestaurant => "South Asian Restaurant",
            MarkerCategory::WesternRestaurant => "Western Restaurant",
            MarkerCategory::VegetarianRestaurant => "Vegetarian Restaurant",
            MarkerCategory::HalalRestaurant => "Halal Restaurant",
            MarkerCategory::HealthyRestaurant => "Healthy Food Restaurant",
            MarkerCategory::ThaiRestaurant => "Thai Restaurant",
            MarkerCategory::Other => "Other",
        };
        write!(f, "{name}")
    }
}

/// A point entity drawn on the map at percentage coordinates.
///
/// Field names follow the REST payload (`pinX`, `nameTh`, ...). Backend ids are
/// numeric; they are kept as strings here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerEntity {
    #[serde(deserialize_with = "id_from_number_or_string")]
    pub id: String,
    #[serde(rename = "pinX", default = "default_pin", deserialize_with = "pin_or_default")]
    pub normalized_x: f64,
    #[serde(rename = "pinY", default = "default_pin", deserialize_with = "pin_or_default")]
    pub normalized_y: f64,
    #[serde(default)]
    pub icon_ref: String,
    #[serde(default)]
    pub name_th: String,
    #[serde(default)]
    pub name_en: Option<String>,
    #[serde(default)]
    pub description_th: String,
    #[serde(default)]
    pub description_en: Option<String>,
    pub category: MarkerCategory,
    #[serde(default)]
    pub sub_district: Option<String>,
}

impl MarkerEntity {
    /// Fill the icon from the category and force coordinates into `[0, 100]`.
    /// Non-finite coordinates become `0`.
    pub fn normalized(mut self) -> Self {
        if self.icon_ref.is_empty() {
            self.icon_ref = self.category.pin_icon().to_string();
        }
        self.normalized_x = calc::finite_or_zero(self.normalized_x).clamp(0.0, 100.0);
        self.normalized_y = calc::finite_or_zero(self.normalized_y).clamp(0.0, 100.0);
        self
    }

    /// Display name, preferring English when asked and available.
    pub fn display_name(&self, english: bool) -> &str {
        match (&self.name_en, english) {
            (Some(en), true) if !en.is_empty() => en,
            _ => &self.name_th,
        }
    }
}

fn default_pin() -> f64 {
    DEFAULT_PIN_PERCENT
}

fn pin_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(DEFAULT_PIN_PERCENT))
}

fn id_from_number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}
