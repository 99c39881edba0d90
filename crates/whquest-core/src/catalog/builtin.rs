use super::{Quest, Stage};

fn quest(id: &str, title: &str, description: &str, glyph: &str, guide_url: Option<&str>) -> Quest {
    Quest {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        guide_url: guide_url.map(Into::into),
        glyph: glyph.into(),
    }
}

pub(super) fn stages() -> Vec<Stage> {
    vec![
        Stage {
            id: 1,
            title: "Eligibility Check".into(),
            description: "Check if you meet the requirements for an Australian Working Holiday visa"
                .into(),
            glyph: "🔍".into(),
            color: "#3B82F6".into(),
            quests: vec![
                quest(
                    "1-1",
                    "Age Verification",
                    "Confirm you are between 18 and 30 years old at the time of application",
                    "🎂",
                    Some("https://immi.homeaffairs.gov.au/visas/getting-a-visa/visa-listing/work-holiday-417/first-working-holiday-417#Eligibility"),
                ),
                quest(
                    "1-2",
                    "Passport",
                    "Prepare or renew your passport with at least 6 months validity",
                    "📘",
                    Some("https://www.passport.go.kr/home/kor/contents.do?menuPos=2"),
                ),
                quest(
                    "1-3",
                    "Health Examination",
                    "Book a health examination at a designated panel physician",
                    "🏥",
                    Some("https://immi.homeaffairs.gov.au/help-support/meeting-our-requirements/health/arrange-your-health-examinations"),
                ),
                quest(
                    "1-4",
                    "Police Clearance",
                    "Request a criminal record check from the police agency",
                    "🔒",
                    Some("https://crims.police.go.kr/"),
                ),
            ],
        },
        Stage {
            id: 2,
            title: "Visa Application".into(),
            description: "Apply for the Australian Working Holiday visa (subclass 417)".into(),
            glyph: "📋".into(),
            color: "#8B5CF6".into(),
            quests: vec![
                quest(
                    "2-1",
                    "Create ImmiAccount",
                    "Register an account on the Australian immigration portal",
                    "👤",
                    Some("https://online.immi.gov.au/lusc/register"),
                ),
                quest(
                    "2-2",
                    "Fill Visa Application",
                    "Complete the Working Holiday visa application form (subclass 417)",
                    "📝",
                    Some("https://immi.homeaffairs.gov.au/visas/getting-a-visa/visa-listing/work-holiday-417"),
                ),
                quest(
                    "2-3",
                    "Pay Visa Fee",
                    "Pay the visa application charge of AUD 640",
                    "💳",
                    Some("https://immi.homeaffairs.gov.au/visas/getting-a-visa/fees-and-charges/current-visa-pricing/work"),
                ),
                quest(
                    "2-4",
                    "Complete Health Examination",
                    "Attend and complete the health examination appointment",
                    "✅",
                    Some("https://immi.homeaffairs.gov.au/help-support/meeting-our-requirements/health"),
                ),
                quest(
                    "2-5",
                    "Visa Approval",
                    "Wait for and confirm your visa grant notification",
                    "🎉",
                    Some("https://online.immi.gov.au/lusc/login"),
                ),
            ],
        },
        Stage {
            id: 3,
            title: "Preparation".into(),
            description: "Get everything ready before departing for Australia".into(),
            glyph: "🎒".into(),
            color: "#F59E0B".into(),
            quests: vec![
                quest(
                    "3-1",
                    "Book Flights",
                    "Book your flight tickets to Australia",
                    "✈️",
                    Some("https://www.skyscanner.co.kr/"),
                ),
                quest(
                    "3-2",
                    "Travel Insurance",
                    "Purchase overseas travel and health insurance",
                    "🛡️",
                    Some("https://www.worldnomads.com/"),
                ),
                quest(
                    "3-3",
                    "Bank Account",
                    "Open an Australian bank account (e.g., CommBank, NAB)",
                    "🏦",
                    Some("https://www.commbank.com.au/moving-to-australia.html"),
                ),
                quest(
                    "3-4",
                    "TFN Preparation",
                    "Prepare to apply for a Tax File Number upon arrival",
                    "🔢",
                    Some("https://www.ato.gov.au/individuals-and-families/tax-file-number/apply-for-a-tfn"),
                ),
                quest(
                    "3-5",
                    "Initial Accommodation",
                    "Book initial accommodation (hostel or share house)",
                    "🏠",
                    Some("https://www.hostelworld.com/st/australia/"),
                ),
                quest(
                    "3-6",
                    "International Driving Permit",
                    "Get an international driving permit from your local authority",
                    "🚗",
                    Some("https://www.safedriving.or.kr/guide/larGuide051.do"),
                ),
                quest(
                    "3-7",
                    "Install Essential Apps",
                    "Install essential apps: Seek, Gumtree, Google Maps",
                    "📱",
                    Some("https://www.seek.com.au/"),
                ),
            ],
        },
        Stage {
            id: 4,
            title: "Departure".into(),
            description: "Final steps before your adventure begins!".into(),
            glyph: "🛫".into(),
            color: "#10B981".into(),
            quests: vec![
                quest(
                    "4-1",
                    "Packing Checklist",
                    "Review and complete your packing checklist",
                    "🧳",
                    None,
                ),
                quest(
                    "4-2",
                    "Arrive at Airport",
                    "Arrive at the airport with all documents ready",
                    "🏢",
                    None,
                ),
                quest(
                    "4-3",
                    "Board the Plane!",
                    "Board your flight to Australia!",
                    "🎊",
                    None,
                ),
            ],
        },
    ]
}
