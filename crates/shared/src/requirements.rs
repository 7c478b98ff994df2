//! Static requirement metadata for certification tracks.
//!
//! Standalone lookup with no dependency on application state. A real
//! deployment would query the issuing authority; this returns the fixed
//! reference data with a generic fallback for unknown tracks.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificationRequirements {
    pub education: &'static str,
    pub experience: &'static str,
    pub courses: &'static [&'static str],
    pub exam_fee: &'static str,
}

pub fn requirements_for(track: &str) -> CertificationRequirements {
    match track {
        "web-design" => CertificationRequirements {
            education: "고등학교 졸업 이상",
            experience: "관련 분야 6개월 이상",
            courses: &["웹디자인 기초", "HTML/CSS", "JavaScript"],
            exam_fee: "50,000원",
        },
        "network" => CertificationRequirements {
            education: "전문대 졸업 이상",
            experience: "관련 분야 1년 이상",
            courses: &["네트워크 기초", "라우팅/스위칭", "보안"],
            exam_fee: "80,000원",
        },
        "database" => CertificationRequirements {
            education: "대학교 졸업 이상",
            experience: "관련 분야 2년 이상",
            courses: &["데이터베이스 설계", "SQL", "데이터 모델링"],
            exam_fee: "100,000원",
        },
        _ => CertificationRequirements {
            education: "관련 학력",
            experience: "관련 경험",
            courses: &["전공 과목 수강"],
            exam_fee: "문의",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_track_returns_its_metadata() {
        let reqs = requirements_for("network");
        assert_eq!(reqs.experience, "관련 분야 1년 이상");
        assert_eq!(reqs.courses.len(), 3);
    }

    #[test]
    fn unknown_track_falls_back_to_placeholder() {
        let reqs = requirements_for("quantum-computing");
        assert_eq!(reqs.education, "관련 학력");
        assert_eq!(reqs.exam_fee, "문의");
    }
}
