//! Hand-maintained broker records compiled into the binary.

use crate::models::{BrokerRecord, CategoryRatings, ClientProtection, Faq};

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The three standard FAQ entries every review carries.
fn standard_faqs(name: &str, regulated: &str, deposit: &str, special: &str) -> Vec<Faq> {
    vec![
        Faq::new(format!("Is {} regulated?", name), regulated),
        Faq::new(
            format!("What is the minimum deposit for {}?", name),
            deposit,
        ),
        Faq::new(format!("What makes {} special?", name), special),
    ]
}

pub(super) fn records() -> Vec<BrokerRecord> {
    vec![
        fxopen(),
        dukascopy(),
        blackbull_markets(),
        merrill_edge(),
        trading_212(),
        m1_finance(),
        fxcm(),
        etoro(),
        xm(),
        ic_markets(),
    ]
}

fn fxopen() -> BrokerRecord {
    BrokerRecord {
        slug: "fxopen".to_string(),
        logo: Some("/images/brokers/fxopen.png".to_string()),
        min_deposit: Some(1),
        spread: Some("From 0.0 pips".to_string()),
        platforms: list(&["MT4", "MT5", "FXOpen Platform"]),
        regulation: list(&["FCA", "CySEC", "ASIC"]),
        pros: list(&["Ultra-low minimum deposit", "ECN execution", "Strong regulation", "Multiple platforms"]),
        cons: list(&["Commission-based accounts", "Complex fee structure", "Limited educational content"]),
        country: Some("UK".to_string()),
        established: Some(2005),
        feature: Some("Ultra-Accessible ECN Trading".to_string()),
        description: "FXOpen is a UK-based multi-asset broker offering ultra-low minimum deposits with ECN execution and strong regulatory oversight. Key features include FCA, CySEC regulation, $1 min deposit, ECN execution. Particularly suitable for traders seeking accessible professional trading with ECN conditions.".to_string(),
        headline: "FXOpen is a trusted multi-asset broker renowned for its ultra-low minimum deposits and ECN execution quality. With strong regulatory oversight and professional trading conditions, FXOpen serves traders seeking accessible entry to institutional-grade trading.".to_string(),
        faqs: standard_faqs(
            "FXOpen",
            "FXOpen is regulated by FCA, CySEC, and ASIC, ensuring comprehensive regulatory oversight across multiple jurisdictions.",
            "FXOpen has a minimum deposit of just $1, making professional trading accessible to everyone.",
            "FXOpen offers ultra-low minimum deposits with ECN execution and strong regulatory compliance.",
        ),
        max_leverage: Some("1:500".to_string()),
        account_types: list(&["ECN", "STP", "Crypto"]),
        supported_assets: list(&["Forex", "Indices", "Commodities", "Crypto"]),
        protection: ClientProtection {
            segregated_accounts: Some(true),
            negative_balance_protection: Some(true),
            investor_compensation: Some(true),
        },
        category_ratings: CategoryRatings {
            fees: Some(4.6),
            platforms: Some(4.3),
            markets: Some(4.1),
            research: Some(3.6),
            customer_service: Some(4.2),
            deposit: Some(4.5),
        },
        ..BrokerRecord::new(
            "a0000000-0000-0000-0000-000000000600",
            "FXOpen",
            4.4,
            "https://www.fxopen.com",
        )
    }
}

fn dukascopy() -> BrokerRecord {
    BrokerRecord {
        logo: Some("/images/brokers/dukascopy.png".to_string()),
        min_deposit: Some(100),
        spread: Some("From 0.1 pips".to_string()),
        platforms: list(&["JForex", "MT4", "Dukascopy Mobile"]),
        regulation: list(&["FINMA", "JFSC"]),
        pros: list(&["Swiss banking heritage", "ECN execution", "Advanced technology", "Transparent pricing"]),
        cons: list(&["Higher minimum deposit", "Complex platform", "Limited crypto options"]),
        country: Some("Switzerland".to_string()),
        established: Some(1998),
        feature: Some("Swiss Banking Excellence".to_string()),
        description: "Dukascopy is a Swiss-based ECN broker offering institutional-grade trading with Swiss banking heritage and advanced technology. Key features include FINMA regulation, $100 min deposit, ECN execution. Particularly suitable for professional traders seeking Swiss quality and transparent pricing.".to_string(),
        headline: "Dukascopy is a premier Swiss ECN broker renowned for its institutional-grade trading technology and Swiss banking heritage. With transparent pricing and advanced execution, Dukascopy serves professional traders who demand the highest quality and reliability.".to_string(),
        faqs: standard_faqs(
            "Dukascopy",
            "Dukascopy is regulated by FINMA (Swiss Financial Market Supervisory Authority) and JFSC, ensuring the highest regulatory standards.",
            "Dukascopy has a minimum deposit of $100 for most trading accounts.",
            "Dukascopy offers Swiss banking heritage with ECN execution and institutional-grade technology.",
        ),
        max_leverage: Some("1:200".to_string()),
        account_types: list(&["Standard", "Professional"]),
        parent_company: Some("Dukascopy Bank SA".to_string()),
        trading_fee: Some(0.0035),
        protection: ClientProtection {
            segregated_accounts: Some(true),
            negative_balance_protection: Some(true),
            investor_compensation: Some(true),
        },
        ..BrokerRecord::new(
            "a1000000-0000-0000-0000-000000000610",
            "Dukascopy",
            4.4,
            "https://www.dukascopy.com",
        )
    }
}

fn blackbull_markets() -> BrokerRecord {
    BrokerRecord {
        logo: Some("/images/brokers/blackbull-markets.png".to_string()),
        min_deposit: Some(10),
        spread: Some("From 0.0 pips".to_string()),
        platforms: list(&["MT4", "MT5", "BlackBull Mobile"]),
        regulation: list(&["FMA", "ASIC"]),
        pros: list(&["Very low minimum deposit", "ECN execution", "Competitive spreads", "Copy trading"]),
        cons: list(&["Limited regulation", "New Zealand focus", "Limited educational content"]),
        country: Some("New Zealand".to_string()),
        established: Some(2014),
        feature: Some("Low-Cost ECN Access".to_string()),
        description: "BlackBull Markets is a New Zealand-based ECN broker offering very low minimum deposits with competitive spreads and copy trading. Key features include FMA, ASIC regulation, $10 min deposit, ECN execution. Particularly suitable for traders seeking affordable ECN access with professional conditions.".to_string(),
        headline: "BlackBull Markets is a trusted ECN broker renowned for its very low minimum deposits and competitive spreads. With professional execution and copy trading features, BlackBull serves traders seeking affordable access to institutional-grade trading conditions.".to_string(),
        faqs: standard_faqs(
            "BlackBull Markets",
            "BlackBull Markets is regulated by FMA (New Zealand) and ASIC (Australia), ensuring comprehensive regulatory oversight.",
            "BlackBull Markets has a minimum deposit of just $10 for ECN trading accounts.",
            "BlackBull Markets offers very low minimum deposits with ECN execution and competitive spreads.",
        ),
        max_leverage: Some("1:500".to_string()),
        account_types: list(&["ECN Standard", "ECN Prime", "ECN Institutional"]),
        protection: ClientProtection {
            segregated_accounts: Some(true),
            negative_balance_protection: None,
            investor_compensation: Some(false),
        },
        ..BrokerRecord::new(
            "a2000000-0000-0000-0000-000000000620",
            "BlackBull Markets",
            4.4,
            "https://www.blackbull.com",
        )
    }
}

fn merrill_edge() -> BrokerRecord {
    BrokerRecord {
        logo: Some("/images/brokers/merrill-edge.png".to_string()),
        min_deposit: Some(0),
        spread: Some("$0 commissions".to_string()),
        platforms: list(&["Merrill Edge Platform", "Merrill Edge Mobile"]),
        regulation: list(&["SEC", "FINRA", "SIPC"]),
        pros: list(&["No minimum deposit", "Bank of America integration", "Research tools", "Commission-free trading"]),
        cons: list(&["Limited international markets", "Basic platform features", "Account fees"]),
        country: Some("USA".to_string()),
        established: Some(2010),
        feature: Some("Bank Integration Specialist".to_string()),
        description: "Merrill Edge is Bank of America's investment platform offering commission-free trading with seamless banking integration. Key features include SEC, FINRA regulation, $0 min deposit, banking integration. Particularly suitable for Bank of America customers seeking integrated investing with research tools.".to_string(),
        headline: "Merrill Edge is Bank of America's premier investment platform, offering commission-free trading with seamless banking integration and professional research tools. With strong regulatory oversight and institutional backing, Merrill Edge serves investors seeking comprehensive financial services.".to_string(),
        faqs: standard_faqs(
            "Merrill Edge",
            "Merrill Edge is regulated by SEC, FINRA, and provides SIPC protection up to $500,000 per account.",
            "Merrill Edge has no minimum deposit requirement for most investment accounts.",
            "Merrill Edge offers seamless Bank of America integration with professional research and commission-free trading.",
        ),
        account_types: list(&["Self-Directed", "Guided Investing", "Retirement"]),
        trading_fee: Some(0.0),
        publicly_traded: Some(true),
        parent_company: Some("Bank of America".to_string()),
        protection: ClientProtection {
            segregated_accounts: Some(true),
            negative_balance_protection: None,
            investor_compensation: Some(true),
        },
        category_ratings: CategoryRatings {
            fees: Some(4.7),
            platforms: Some(4.0),
            markets: Some(3.5),
            research: Some(4.8),
            customer_service: Some(4.4),
            deposit: Some(4.6),
        },
        ..BrokerRecord::new(
            "a3000000-0000-0000-0000-000000000630",
            "Merrill Edge",
            4.4,
            "https://www.merrilledge.com",
        )
    }
}

fn trading_212() -> BrokerRecord {
    BrokerRecord {
        logo: Some("/images/brokers/trading-212.png".to_string()),
        min_deposit: Some(1),
        spread: Some("$0 commissions".to_string()),
        platforms: list(&["Trading 212 Platform", "Trading 212 Mobile"]),
        regulation: list(&["FCA", "CySEC"]),
        pros: list(&["Ultra-low minimum deposit", "Commission-free trading", "Fractional shares", "User-friendly platform"]),
        cons: list(&["Limited advanced tools", "European focus", "Account restrictions"]),
        country: Some("UK".to_string()),
        established: Some(2004),
        feature: Some("Commission-Free Pioneer".to_string()),
        description: "Trading 212 is a UK-based commission-free broker offering ultra-low minimum deposits with fractional shares and user-friendly platform. Key features include FCA, CySEC regulation, $1 min deposit, commission-free trading. Particularly suitable for beginner investors seeking accessible commission-free investing.".to_string(),
        headline: "Trading 212 is a pioneering commission-free broker renowned for its ultra-low minimum deposits and user-friendly platform. With fractional shares and strong regulatory oversight, Trading 212 serves modern investors seeking accessible and affordable investing.".to_string(),
        faqs: standard_faqs(
            "Trading 212",
            "Trading 212 is regulated by FCA and CySEC, ensuring comprehensive regulatory oversight across European markets.",
            "Trading 212 has a minimum deposit of just $1, making investing accessible to everyone.",
            "Trading 212 offers commission-free trading with fractional shares and ultra-low minimum deposits.",
        ),
        max_leverage: Some("1:30".to_string()),
        account_types: list(&["Invest", "ISA", "CFD"]),
        trading_fee: Some(0.0),
        protection: ClientProtection {
            segregated_accounts: Some(true),
            negative_balance_protection: Some(true),
            investor_compensation: Some(true),
        },
        ..BrokerRecord::new(
            "a4000000-0000-0000-0000-000000000640",
            "Trading 212",
            4.4,
            "https://www.trading212.com",
        )
    }
}

fn m1_finance() -> BrokerRecord {
    BrokerRecord {
        logo: Some("/images/brokers/m1-finance.png".to_string()),
        min_deposit: Some(100),
        spread: Some("$0 commissions".to_string()),
        platforms: list(&["M1 Finance Platform", "M1 Finance Mobile"]),
        regulation: list(&["SEC", "FINRA", "SIPC"]),
        pros: list(&["Automated investing", "Fractional shares", "No management fees", "Portfolio optimization"]),
        cons: list(&["Limited trading options", "No options trading", "Account minimums"]),
        country: Some("USA".to_string()),
        established: Some(2015),
        feature: Some("Automated Portfolio Management".to_string()),
        description: "M1 Finance is a US-based automated investing platform offering commission-free trading with portfolio optimization and fractional shares. Key features include SEC, FINRA regulation, $100 min deposit, automated investing. Particularly suitable for long-term investors seeking automated portfolio management with low fees.".to_string(),
        headline: "M1 Finance is an innovative automated investing platform renowned for its portfolio optimization and commission-free trading. With fractional shares and intelligent automation, M1 Finance serves long-term investors seeking hands-off portfolio management with professional optimization.".to_string(),
        faqs: standard_faqs(
            "M1 Finance",
            "M1 Finance is regulated by SEC, FINRA, and provides SIPC protection up to $500,000 per account.",
            "M1 Finance has a minimum deposit of $100 for most investment accounts.",
            "M1 Finance offers automated portfolio management with fractional shares and intelligent rebalancing.",
        ),
        account_types: list(&["Individual", "Joint", "Retirement", "Trust"]),
        trading_fee: Some(0.0),
        ..BrokerRecord::new(
            "a5000000-0000-0000-0000-000000000650",
            "M1 Finance",
            4.4,
            "https://www.m1finance.com",
        )
    }
}

fn fxcm() -> BrokerRecord {
    BrokerRecord {
        logo: Some("/images/brokers/fxcm.png".to_string()),
        min_deposit: Some(50),
        spread: Some("From 1.2 pips".to_string()),
        platforms: list(&["Trading Station", "MT4", "FXCM Mobile"]),
        regulation: list(&["FCA", "ASIC", "FSCA"]),
        pros: list(&["Established reputation", "Advanced charting", "Educational resources", "Strong regulation"]),
        cons: list(&["Higher spreads", "Limited crypto options", "Account fees"]),
        country: Some("UK".to_string()),
        established: Some(1999),
        feature: Some("Established Forex Pioneer".to_string()),
        description: "FXCM is a well-established forex broker offering comprehensive trading services with advanced charting and educational resources. Key features include FCA, ASIC regulation, $50 min deposit, Trading Station. Particularly suitable for forex traders seeking established reputation with advanced tools and education.".to_string(),
        headline: "FXCM is a pioneering forex broker renowned for its established reputation and advanced trading technology. With strong regulatory oversight and comprehensive education, FXCM serves traders seeking a proven partner with professional tools.".to_string(),
        faqs: standard_faqs(
            "FXCM",
            "FXCM is regulated by FCA, ASIC, and FSCA, ensuring comprehensive regulatory oversight across multiple jurisdictions.",
            "FXCM has a minimum deposit of $50 for standard trading accounts.",
            "FXCM offers its proprietary Trading Station platform with advanced charting and extensive educational resources.",
        ),
        max_leverage: Some("1:400".to_string()),
        account_types: list(&["Standard", "Active Trader"]),
        protection: ClientProtection {
            segregated_accounts: Some(true),
            negative_balance_protection: Some(true),
            investor_compensation: Some(true),
        },
        ..BrokerRecord::new(
            "a8000000-0000-0000-0000-000000000680",
            "FXCM",
            4.3,
            "https://www.fxcm.com",
        )
    }
}

fn etoro() -> BrokerRecord {
    BrokerRecord {
        logo: Some("/images/brokers/etoro.png".to_string()),
        min_deposit: Some(50),
        spread: Some("1.0 pips".to_string()),
        platforms: list(&["eToro Platform", "eToro Mobile"]),
        regulation: list(&["FCA", "CySEC", "ASIC"]),
        pros: list(&["Social trading platform", "CopyTrader", "Commission-free stocks", "Intuitive interface"]),
        cons: list(&["Withdrawal fee", "Wider spreads on forex", "Inactivity fee"]),
        country: Some("Israel".to_string()),
        established: Some(2007),
        feature: Some("Social trading platform".to_string()),
        description: "eToro is a multi-asset social trading platform that lets traders copy the positions of experienced investors. Key features include FCA, CySEC, ASIC regulation, $50 min deposit, CopyTrader.".to_string(),
        headline: "eToro is the leading social trading network, combining commission-free investing with CopyTrader so newcomers can follow proven investors.".to_string(),
        faqs: standard_faqs(
            "eToro",
            "eToro is regulated by FCA, CySEC, and ASIC.",
            "eToro has a minimum first deposit of $50 in most regions.",
            "eToro's CopyTrader lets you automatically copy the trades of other investors.",
        ),
        max_leverage: Some("1:30".to_string()),
        account_types: list(&["Retail", "Professional", "Islamic"]),
        publicly_traded: Some(true),
        protection: ClientProtection {
            segregated_accounts: Some(true),
            negative_balance_protection: Some(true),
            investor_compensation: Some(true),
        },
        ..BrokerRecord::new("etoro", "eToro", 4.5, "https://www.etoro.com")
    }
}

fn xm() -> BrokerRecord {
    BrokerRecord {
        logo: Some("/images/brokers/xm.png".to_string()),
        min_deposit: Some(5),
        spread: Some("1.0 pips".to_string()),
        platforms: list(&["MT4", "MT5", "XM App"]),
        regulation: list(&["CySEC", "ASIC", "IFSC"]),
        pros: list(&["Low minimum deposit", "No requotes", "Extensive education"]),
        cons: list(&["Limited stock CFDs", "Inactivity fee"]),
        country: Some("Cyprus".to_string()),
        established: Some(2009),
        feature: Some("Low minimum deposit".to_string()),
        description: "XM is a global forex and CFD broker known for its very low minimum deposit, fast execution and extensive educational programme.".to_string(),
        headline: "XM is a global broker renowned for its $5 minimum deposit and no-requote execution.".to_string(),
        faqs: standard_faqs(
            "XM",
            "XM is regulated by CySEC, ASIC, and IFSC.",
            "XM has a minimum deposit of just $5.",
            "XM combines a $5 minimum deposit with no requotes and a large education library.",
        ),
        max_leverage: Some("1:888".to_string()),
        account_types: list(&["Micro", "Standard", "Ultra Low", "Shares"]),
        ..BrokerRecord::new("xm", "XM", 4.7, "https://www.xm.com")
    }
}

fn ic_markets() -> BrokerRecord {
    BrokerRecord {
        logo: Some("/images/brokers/ic-markets.png".to_string()),
        min_deposit: Some(200),
        spread: Some("0.0 pips".to_string()),
        platforms: list(&["MT4", "MT5", "cTrader"]),
        regulation: list(&["ASIC", "CySEC", "FSA"]),
        pros: list(&["Ultra-low spreads", "Fast execution", "Deep liquidity"]),
        cons: list(&["Limited research", "No proprietary platform"]),
        country: Some("Australia".to_string()),
        established: Some(2007),
        feature: Some("Ultra-low spreads".to_string()),
        description: "IC Markets is an Australian true ECN broker offering raw spreads from 0.0 pips with deep liquidity and fast execution.".to_string(),
        headline: "IC Markets is a leading ECN broker renowned for raw spreads and institutional-grade execution.".to_string(),
        faqs: standard_faqs(
            "IC Markets",
            "IC Markets is regulated by ASIC, CySEC, and FSA.",
            "IC Markets has a minimum deposit of $200.",
            "IC Markets offers raw spreads from 0.0 pips on MT4, MT5 and cTrader.",
        ),
        max_leverage: Some("1:500".to_string()),
        account_types: list(&["Standard", "Raw Spread", "cTrader"]),
        protection: ClientProtection {
            segregated_accounts: Some(true),
            negative_balance_protection: Some(true),
            investor_compensation: None,
        },
        ..BrokerRecord::new("ic-markets", "IC Markets", 4.9, "https://www.icmarkets.com")
    }
}
