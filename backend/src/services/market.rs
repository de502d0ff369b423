//! Market prices and farming cost economics (KES)

use rust_decimal::Decimal;
use serde::Serialize;

use shared::CropType;

/// Date the price table was last refreshed
pub const PRICES_LAST_UPDATED: &str = "2026-02-20";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PriceTrend {
    Rising,
    Stable,
    Falling,
}

/// Current price per kg for a crop
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MarketPrice {
    pub crop_type: CropType,
    pub wholesale: Decimal,
    pub retail: Decimal,
    pub trend: PriceTrend,
    pub last_updated: &'static str,
}

/// Revenue at wholesale and retail prices
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Revenue {
    pub predicted_yield_kg: Decimal,
    pub wholesale_price: Decimal,
    pub retail_price: Decimal,
    pub wholesale_revenue: Decimal,
    pub retail_revenue: Decimal,
    pub price_trend: PriceTrend,
    pub last_updated: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CropPick {
    pub crop: CropType,
    pub retail_price: Decimal,
    pub trend: PriceTrend,
    /// "High", "Medium" or "Standard"
    pub profitability: &'static str,
}

/// Average input costs per acre
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct FarmingCosts {
    pub seeds: u32,
    pub fertilizer: u32,
    pub pesticides: u32,
    pub labor: u32,
    pub irrigation: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Profitability {
    pub total_cost: Decimal,
    pub cost_breakdown: FarmingCosts,
    pub wholesale_revenue: Decimal,
    pub retail_revenue: Decimal,
    pub wholesale_profit: Decimal,
    pub retail_profit: Decimal,
    /// Percent, 0 when there is no cost
    pub roi_wholesale: Decimal,
    pub roi_retail: Decimal,
    /// Kilograms to sell at wholesale to cover the cost, 0 without a price
    pub break_even_kg: Decimal,
}

fn price_entry(crop_type: CropType, wholesale: i64, retail: i64, trend: PriceTrend) -> MarketPrice {
    MarketPrice {
        crop_type,
        wholesale: Decimal::new(wholesale * 100, 2),
        retail: Decimal::new(retail * 100, 2),
        trend,
        last_updated: PRICES_LAST_UPDATED,
    }
}

/// Market price service
#[derive(Debug, Clone, Copy, Default)]
pub struct MarketPriceService;

impl MarketPriceService {
    pub fn new() -> Self {
        Self
    }

    pub fn get_price(&self, crop_type: CropType) -> MarketPrice {
        match crop_type {
            CropType::Maize => price_entry(crop_type, 45, 60, PriceTrend::Stable),
            CropType::Beans => price_entry(crop_type, 120, 150, PriceTrend::Rising),
            CropType::Wheat => price_entry(crop_type, 50, 70, PriceTrend::Falling),
            CropType::Coffee => price_entry(crop_type, 450, 600, PriceTrend::Rising),
            CropType::Tea => price_entry(crop_type, 350, 500, PriceTrend::Stable),
            CropType::Potato => price_entry(crop_type, 40, 55, PriceTrend::Stable),
            CropType::Tomato => price_entry(crop_type, 60, 80, PriceTrend::Rising),
        }
    }

    pub fn all_prices(&self) -> Vec<MarketPrice> {
        CropType::ALL.iter().map(|c| self.get_price(*c)).collect()
    }

    pub fn calculate_revenue(&self, crop_type: CropType, predicted_yield_kg: Decimal) -> Revenue {
        revenue_at(&self.get_price(crop_type), predicted_yield_kg)
    }

    /// Highest retail prices first
    pub fn best_crops_to_plant(&self, limit: usize) -> Vec<CropPick> {
        let mut prices = self.all_prices();
        prices.sort_by(|a, b| b.retail.cmp(&a.retail));

        prices
            .into_iter()
            .take(limit)
            .map(|p| CropPick {
                crop: p.crop_type,
                retail_price: p.retail,
                trend: p.trend,
                profitability: if p.retail > Decimal::from(200) {
                    "High"
                } else if p.retail > Decimal::from(100) {
                    "Medium"
                } else {
                    "Standard"
                },
            })
            .collect()
    }
}

fn revenue_at(price: &MarketPrice, predicted_yield_kg: Decimal) -> Revenue {
    Revenue {
        predicted_yield_kg,
        wholesale_price: price.wholesale,
        retail_price: price.retail,
        wholesale_revenue: predicted_yield_kg * price.wholesale,
        retail_revenue: predicted_yield_kg * price.retail,
        price_trend: price.trend,
        last_updated: price.last_updated,
    }
}

/// Farming cost calculator
#[derive(Debug, Clone, Copy, Default)]
pub struct CostCalculator {
    market: MarketPriceService,
}

impl CostCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn costs_per_acre(&self, crop_type: CropType) -> FarmingCosts {
        let (seeds, fertilizer, pesticides, labor, irrigation, total) = match crop_type {
            CropType::Maize => (3000, 8000, 2000, 5000, 3000, 21000),
            CropType::Beans => (4000, 6000, 2500, 4000, 2000, 18500),
            CropType::Wheat => (3500, 7000, 2000, 4500, 2500, 19500),
            CropType::Coffee => (15000, 12000, 5000, 10000, 5000, 47000),
            CropType::Tea => (12000, 10000, 4000, 8000, 4000, 38000),
            CropType::Potato => (25000, 8000, 3000, 6000, 3000, 45000),
            CropType::Tomato => (5000, 10000, 4000, 8000, 6000, 33000),
        };
        FarmingCosts {
            seeds,
            fertilizer,
            pesticides,
            labor,
            irrigation,
            total,
        }
    }

    pub fn calculate_profitability(
        &self,
        crop_type: CropType,
        area_acres: Decimal,
        predicted_yield_kg: Decimal,
    ) -> Profitability {
        profitability(
            &self.costs_per_acre(crop_type),
            &self.market.get_price(crop_type),
            area_acres,
            predicted_yield_kg,
        )
    }
}

/// Profit, ROI and break-even for explicit cost and price entries
pub fn profitability(
    costs: &FarmingCosts,
    price: &MarketPrice,
    area_acres: Decimal,
    predicted_yield_kg: Decimal,
) -> Profitability {
    let total_cost = Decimal::from(costs.total) * area_acres;
    let revenue = revenue_at(price, predicted_yield_kg);
    let wholesale_profit = revenue.wholesale_revenue - total_cost;
    let retail_profit = revenue.retail_revenue - total_cost;

    let roi = |profit: Decimal| {
        if total_cost > Decimal::ZERO {
            (profit / total_cost * Decimal::ONE_HUNDRED).round_dp(2)
        } else {
            Decimal::ZERO
        }
    };

    let break_even_kg = if price.wholesale > Decimal::ZERO {
        (total_cost / price.wholesale).round_dp(2)
    } else {
        Decimal::ZERO
    };

    Profitability {
        total_cost,
        cost_breakdown: *costs,
        wholesale_revenue: revenue.wholesale_revenue,
        retail_revenue: revenue.retail_revenue,
        wholesale_profit,
        retail_profit,
        roi_wholesale: roi(wholesale_profit),
        roi_retail: roi(retail_profit),
        break_even_kg,
    }
}
