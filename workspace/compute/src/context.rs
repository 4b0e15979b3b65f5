//! Prompt context for report generation and chat.
//!
//! Everything the language model is told about a segment is assembled here:
//! actual and forecast figures, alert levels, the season of the target month,
//! the supply suggestion and a fixed body of donor-behaviour findings.

use std::fmt::Write as _;

use chrono::{Datelike, Months, NaiveDate};
use common::{BloodType, Severity, SupplySuggestionResponse};
use tracing::instrument;

use crate::dataset::ForecastDataset;
use crate::error::Result;
use crate::series::percent_change;
use crate::supply;

/// Donor-behaviour findings the model must always take into account.
pub const ANALYSIS_CONTEXT: &str = r#"**1. 직업별 특성 (대학생 vs 군인/자영업)**

* **대학생(20대):** '학사 일정'에 가장 민감합니다. **시험 기간(중간/기말)**과 **방학** 시즌에는 헌혈량이 급격히 감소합니다.

* **군인(20대 남성):** 학사 일정보다는 **'입대 시즌'**과 **'훈련소 입대 인원'**에 정비례하여 헌혈량이 변동합니다.

* **자영업/가사:** 학사 일정의 영향이 거의 없으며 상대적으로 독립적인 패턴을 보입니다.

**2. 근무 시간 및 요일 영향 (직장인 vs 그 외)**

* **직장인/공무원(30-40대):** **평일 근무 시간**과 헌혈의 집 운영 시간이 겹쳐 접근성이 떨어집니다. 따라서 **'공휴일'**이나 **'점심시간'** 캠페인 여부에 민감합니다.

* **자영업:** 근무 시간 조절이 비교적 자유로워 평일 낮 시간대 참여 가능성이 더 높습니다.

**3. 날씨 및 계절 영향 (고령층)**

* **고령층(50대 이상):** **'기온'**과 **'계절'**에 매우 민감합니다. **폭염**이나 **한파** 주의보가 발령되거나 강수량이 많은 날에는 이동성이 떨어져 헌혈량이 급감합니다.

* **청년층:** 날씨보다는 학사 일정이나 이벤트 유무에 더 큰 영향을 받습니다.

**4. 헌혈 상품 및 인센티브 (성별 차이)**

* **여성(특히 10대~20대):** **'헌혈 기념품(Goods)'**에 매우 민감하게 반응합니다. 특히 **유명 아이돌 포토카드**나 **올리브영 상품권** 프로모션이 있을 때 참여율이 유의미하게 상승합니다.

* **남성:** 기념품보다는 군 가산점, 예비군 훈련 시간 인정 등 **실질적 혜택**이나 **사회적 의무감**에 더 반응하는 경향이 있습니다."#;

pub const REPORT_TEMPERATURE: f32 = 0.7;
pub const REPORT_MAX_TOKENS: u32 = 2000;
pub const CHAT_TEMPERATURE: f32 = 0.7;
pub const CHAT_MAX_TOKENS: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// Season of a calendar month (1-12).
    pub fn of_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Season::Winter,
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            _ => Season::Autumn,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Season::Spring => "봄",
            Season::Summer => "여름",
            Season::Autumn => "가을",
            Season::Winter => "겨울",
        }
    }

    /// How the season typically affects donations.
    pub fn note(&self) -> &'static str {
        match self {
            Season::Winter => "겨울철에는 한파로 인해 고령층의 헌혈 참여가 감소하며, 특히 폭설이나 강추위 시 이동성이 크게 떨어집니다. 실내 헌혈 버스나 따뜻한 헌혈의 집 운영이 중요합니다.",
            Season::Summer => "여름철에는 폭염으로 인해 고령층의 헌혈 참여가 감소하며, 휴가철로 인해 청년층의 헌혈도 감소할 수 있습니다. 시원한 헌혈의 집이나 실내 헌혈 버스 운영이 중요합니다.",
            Season::Spring => "봄철에는 대학생들의 학사 일정(중간고사)으로 인해 헌혈량이 감소할 수 있습니다. 대학 캠퍼스 헌혈 버스나 시험 기간 전 캠페인이 효과적입니다.",
            Season::Autumn => "가을철에는 대학생들의 학사 일정(기말고사)으로 인해 헌혈량이 감소할 수 있습니다. 대학 캠퍼스 헌혈 버스나 시험 기간 전 캠페인이 효과적입니다.",
        }
    }
}

/// Figures for one forecast horizon.
#[derive(Debug, Clone, PartialEq)]
pub struct HorizonOutlook {
    pub month: u8,
    pub forecast: Option<f64>,
    pub severity: Option<Severity>,
    /// Baseline minus forecast
    pub decrease: Option<f64>,
    /// Change against the baseline in percent
    pub percent_change: Option<f64>,
}

/// Everything known about one segment, for one target month.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentContext {
    pub region: String,
    pub blood_type: BloodType,
    pub month: u8,
    pub last_actual: f64,
    pub baseline: f64,
    pub horizons: [HorizonOutlook; 3],
    pub forecast_date: NaiveDate,
    pub season: Season,
    pub supply: SupplySuggestionResponse,
}

impl SegmentContext {
    pub fn target(&self) -> &HorizonOutlook {
        &self.horizons[usize::from(self.month.clamp(1, 3) - 1)]
    }

    /// Alert level of the target month.
    pub fn severity(&self) -> Option<&Severity> {
        self.target().severity.as_ref()
    }
}

/// Gathers the context for `region`/`blood_type`, `month` months ahead.
#[instrument(skip(dataset))]
pub fn collect(
    dataset: &ForecastDataset,
    region: &str,
    blood_type: BloodType,
    month: u8,
) -> Result<SegmentContext> {
    let segment = dataset.resolve(region, blood_type, month)?;
    let supply = supply::suggest(dataset, region, blood_type, month)?;
    let baseline = segment.baseline();

    let horizons = [1u8, 2, 3].map(|m| {
        let forecast = segment.forecast(m);
        HorizonOutlook {
            month: m,
            forecast,
            severity: segment.severity(m),
            decrease: forecast.map(|f| baseline - f),
            percent_change: forecast.and_then(|f| percent_change(f, baseline)),
        }
    });

    let forecast_date = dataset
        .last_date()
        .checked_add_months(Months::new(u32::from(month)))
        .unwrap_or_else(|| dataset.last_date());

    Ok(SegmentContext {
        region: region.to_string(),
        blood_type,
        month,
        last_actual: segment.last_actual(),
        baseline,
        horizons,
        forecast_date,
        season: Season::of_month(forecast_date.month()),
        supply,
    })
}

fn outlook_lines(outlook: &HorizonOutlook) -> String {
    let Some(forecast) = outlook.forecast else {
        return "- **예측값**: 데이터 없음\n- **경보 단계**: 데이터 없음\n- **평균 대비 감소**: 데이터 없음"
            .to_string();
    };
    let severity = outlook
        .severity
        .as_ref()
        .map(Severity::label)
        .unwrap_or("정상");
    let decrease = match (outlook.decrease, outlook.percent_change) {
        (Some(decrease), Some(pct)) => format!("{:.0}건 ({:.1}%)", decrease, pct),
        _ => "데이터 없음".to_string(),
    };
    format!(
        "- **예측값**: {:.0}건\n- **경보 단계**: {}\n- **평균 대비 감소**: {}",
        forecast, severity, decrease
    )
}

fn render(context: &SegmentContext, heading: &str) -> String {
    let period = format!(
        "{} ({})",
        context.forecast_date.format("%Y년 %m월"),
        context.season.label()
    );

    let mut text = String::new();
    let _ = writeln!(text, "## {}", heading);
    let _ = writeln!(text, "- **지역**: {}", context.region);
    let _ = writeln!(text, "- **혈액형**: {}", context.blood_type);
    let _ = writeln!(
        text,
        "- **예측 기간**: {}개월 후 ({}, {})",
        context.month,
        context.forecast_date.format("%Y년 %m월"),
        context.season.label()
    );
    text.push('\n');

    text.push_str("## 실제 데이터\n");
    let _ = writeln!(text, "- **바로 전달의 실제 값**: {:.0}건", context.last_actual);
    let _ = writeln!(text, "- **1년 평균값 (baseline)**: {:.0}건", context.baseline);
    text.push('\n');

    text.push_str("## 예측값 및 경보 단계\n");
    for outlook in &context.horizons {
        let _ = writeln!(text, "### {}개월 후 예측", outlook.month);
        let _ = writeln!(text, "{}", outlook_lines(outlook));
        text.push('\n');
    }

    let _ = writeln!(text, "## 현재 예측 ({}개월 후)", context.month);
    let _ = writeln!(text, "{}", outlook_lines(context.target()));
    let _ = writeln!(text, "- **예측 월**: {}", period);
    text.push('\n');

    text.push_str("## 조달 제안\n");
    if context.supply.suggestions.is_empty() {
        text.push_str("- 조달 가능한 지역이 없습니다.\n");
    } else {
        let _ = writeln!(text, "- **부족량**: {:.0}건", context.supply.shortage_amount);
        let _ = writeln!(text, "- **제안된 조달량**: {:.0}건", context.supply.total_suggested);
        text.push_str("- **조달 가능 지역**:\n");
        for suggestion in &context.supply.suggestions {
            let _ = writeln!(
                text,
                "  - {}: {:.0}건 (거리: {:.0}km)",
                suggestion.source_region, suggestion.amount, suggestion.distance
            );
        }
    }

    let _ = write!(
        text,
        "\n## 분석 Context (항상 고려해야 할 사항)\n{}\n\n## 계절별 특성 ({})\n{}\n",
        ANALYSIS_CONTEXT,
        context.season.label(),
        context.season.note()
    );

    text
}

/// Context block embedded in chat prompts.
pub fn format_for_chat(context: &SegmentContext) -> String {
    render(context, "현재 분석 중인 세그멘트")
}

/// Context block embedded in report prompts.
pub fn format_for_report(context: &SegmentContext) -> String {
    render(context, "분석 대상 세그멘트")
}

/// A single chat-completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Prompt for the five-section narrative report.
pub fn report_prompt(context: &SegmentContext) -> Prompt {
    let season = context.season.label();
    let system = "You are an expert blood supply analyst with deep knowledge of healthcare logistics and blood bank management.
You specialize in analyzing blood supply shortages and providing actionable recommendations based on forecast data, seasonal patterns, and demographic insights.
Always consider the analysis context (직업별 특성, 근무 시간, 날씨/계절, 헌혈 상품/인센티브) when making recommendations.
Write reports in Korean.";

    let user = format!(
        r#"{context}

## 리포트 작성 지침

위의 context를 바탕으로 다음 내용을 포함한 종합 분석 리포트를 작성해주세요:

### 1. 전반적인 분석
- 현재 상황 분석 (어떠어떠한 상황인지)
- 얼마나 부족할 예정인지 (부족량, 감소율)
- 경보 단계의 의미와 심각성

### 2. 원인 분석
- 분석 context를 바탕으로 왜 이런 부족이 발생할 수 있는지 분석
- 계절적 요인 ({season}) 고려
- 직업별, 연령대별, 성별 특성 고려

### 3. 조달 제안
- 부족한 상황이라면 어떻게 지역에서 조달을 받아야 하는지
- 조달 가능 지역과 조달량 제안
- 거리와 실현 가능성 고려

### 4. 헌혈량 증진을 위한 활동 제안
분석 context를 바탕으로 다음을 고려하여 구체적인 활동을 제안:
- **군인 대상 캠페인**: 입대 시즌, 훈련소 입대 인원 고려
- **직장인 대상 헌혈 버스**: 평일 근무 시간, 공휴일, 점심시간 캠페인
- **대학생 대상 캠페인**: 학사 일정(시험 기간, 방학) 고려
- **고령층 대상 캠페인**: 날씨 및 계절 영향 고려 (폭염, 한파 주의보)
- **여성 대상 캠페인**: 헌혈 기념품(Goods), 유명 아이돌 포토카드, 올리브영 상품권 프로모션
- **남성 대상 캠페인**: 군 가산점, 예비군 훈련 시간 인정 등 실질적 혜택
- **계절별 특성**: {season}철 특성에 맞는 활동 제안

### 5. 위험 평가 및 대응 방안
- 위험 수준 평가
- 대응 우선순위

리포트는 한글로 작성하고, 구체적인 수치와 데이터를 포함하여 작성해주세요."#,
        context = format_for_report(context),
        season = season,
    );

    Prompt {
        system: system.to_string(),
        user,
        temperature: REPORT_TEMPERATURE,
        max_tokens: REPORT_MAX_TOKENS,
    }
}

/// Prompt answering `message` about the segment.
pub fn chat_prompt(context: &SegmentContext, message: &str) -> Prompt {
    let system = format!(
        "You are a helpful AI assistant specialized in blood supply management and forecasting.
You are currently discussing blood supply for {region}, specifically Type {blood_type}, {month} months ahead.

You have access to comprehensive forecast data and analysis context. Use this information to provide accurate, helpful answers.
Always consider the analysis context (직업별 특성, 근무 시간, 날씨/계절, 헌혈 상품/인센티브) when answering questions.
Be concise but informative, and provide specific numbers and insights from the data when relevant.
Answer in Korean.",
        region = context.region,
        blood_type = context.blood_type,
        month = context.month,
    );

    let user = format!(
        "{}\n## 사용자 질문\n{}\n\n위의 context를 바탕으로 사용자의 질문에 답변해주세요. 예측값, 경보 단계, 조달 제안, 계절적 특성 등을 고려하여 답변해주세요.",
        format_for_chat(context),
        message.trim()
    );

    Prompt {
        system,
        user,
        temperature: CHAT_TEMPERATURE,
        max_tokens: CHAT_MAX_TOKENS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "lastDate": "2024-11-01",
        "series": [
            {"region": "부산", "bloodType": "O", "history": [100, 100, 90], "forecasts": [60, null, 95]},
            {"region": "울산", "bloodType": "O", "history": [100], "forecasts": [150, 150, 150]}
        ]
    }"#;

    fn context(month: u8) -> SegmentContext {
        let dataset = ForecastDataset::from_json_str(SAMPLE).unwrap();
        collect(&dataset, "부산", BloodType::O, month).unwrap()
    }

    #[test]
    fn test_season_of_month() {
        assert_eq!(Season::of_month(12), Season::Winter);
        assert_eq!(Season::of_month(2), Season::Winter);
        assert_eq!(Season::of_month(3), Season::Spring);
        assert_eq!(Season::of_month(8), Season::Summer);
        assert_eq!(Season::of_month(11), Season::Autumn);
    }

    #[test]
    fn test_forecast_date_rolls_over_year() {
        let ctx = context(3);

        assert_eq!(ctx.forecast_date, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
        assert_eq!(ctx.season, Season::Winter);
    }

    #[test]
    fn test_collect_figures() {
        let ctx = context(1);

        assert_eq!(ctx.last_actual, 90.0);
        assert_eq!(ctx.horizons[0].severity, Some(Severity::Warning));
        assert_eq!(ctx.horizons[1].forecast, None);
        assert_eq!(ctx.severity(), Some(&Severity::Warning));
        assert_eq!(ctx.season, Season::Winter);
        assert_eq!(ctx.supply.suggestions.len(), 1);
        assert_eq!(ctx.supply.suggestions[0].source_region, "울산");
    }

    #[test]
    fn test_rendered_context_sections() {
        let text = format_for_chat(&context(1));

        assert!(text.starts_with("## 현재 분석 중인 세그멘트"));
        assert!(text.contains("- **지역**: 부산"));
        assert!(text.contains("2024년 12월"));
        assert!(text.contains("### 2개월 후 예측\n- **예측값**: 데이터 없음"));
        assert!(text.contains("- **경보 단계**: 경계"));
        assert!(text.contains("  - 울산: 37건 (거리: 30km)"));
        assert!(text.contains("## 계절별 특성 (겨울)"));
        assert!(text.contains(ANALYSIS_CONTEXT));
    }

    #[test]
    fn test_prompts() {
        let ctx = context(1);

        let report = report_prompt(&ctx);
        assert!(report.user.starts_with("## 분석 대상 세그멘트"));
        assert!(report.user.contains("계절적 요인 (겨울) 고려"));
        assert_eq!(report.max_tokens, 2000);

        let chat = chat_prompt(&ctx, "  왜 부족한가요? ");
        assert!(chat.system.contains("부산, specifically Type O, 1 months ahead"));
        assert!(chat.user.contains("## 사용자 질문\n왜 부족한가요?\n"));
        assert_eq!(chat.max_tokens, 1000);
    }
}
