use serde_derive::Serialize;

/// Static profile served by `GET /api/resume`.
#[derive(Debug, Serialize)]
pub struct ResumeProfile {
    pub name: &'static str,
    pub title: &'static str,
    pub school: &'static str,
    pub gpa: &'static str,
    pub location: &'static str,
    pub status: &'static str,
    pub email: &'static str,
    /// Profile link, exposed as `linkedin` to the widget.
    pub linkedin: &'static str,
    pub skills: &'static [&'static str],
    pub projects: &'static [Project],
}

#[derive(Debug, Serialize)]
pub struct Project {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub category: &'static str,
    #[serde(rename = "desc")]
    pub description: &'static str,
    pub stack: &'static [&'static str],
}

pub static RESUME: ResumeProfile = ResumeProfile {
    name: "Shuangyi Hu",
    title: "M.S. Computer Software Engineering",
    school: "Northeastern University",
    gpa: "4.0",
    location: "Boston, MA",
    status: "Open to work — Summer 2025",
    email: "amandashuangyihu@gmail.com",
    linkedin: "https://www.linkedin.com/in/shuangyi-hu/",
    skills: &[
        "Java",
        "Python",
        "JavaScript",
        "TypeScript",
        "Spring Boot",
        "React",
        "Node.js",
        "Redis",
        "RabbitMQ",
        "Seata",
        "Docker",
        "AWS",
        "MongoDB",
        "MySQL",
        "Gemini AI",
        "Microservices",
    ],
    projects: &[
        Project {
            name: "DrivePro",
            category: "Distributed Systems · Backend",
            description: "Microservices-based chauffeur management system with real-time booking and distributed transactions.",
            stack: &["Spring Boot", "Redis", "RabbitMQ", "Seata"],
        },
        Project {
            name: "ShopEase",
            category: "Full-Stack · E-Commerce",
            description: "MERN stack e-commerce platform with Redux, Docker deployment, and AWS S3 media storage.",
            stack: &["MongoDB", "React", "Node.js", "Docker", "AWS S3"],
        },
        Project {
            name: "EmailPilot",
            category: "AI · Chrome Extension",
            description: "AI-powered Gmail & Outlook extension — auto-writes, smart-replies, summarizes. 40% efficiency gain.",
            stack: &["JavaScript", "CSS", "Gemini Nano AI"],
        },
    ],
};
