//! Fixed demo data loaded at startup: the login roster, the initial
//! project catalog and the initial student assignments.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::model::*;

fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, 0)
        .earliest()
        .unwrap_or_default()
}

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

pub fn roster() -> Vec<RosterEntry> {
    vec![
        RosterEntry::admin(1, "admin", "admin123", "Administrator"),
        RosterEntry::student(
            2,
            "student1",
            "123456",
            "Carlos García",
            StudentProfile {
                grade: "5th grade".into(),
                joined_on: day(2025, 1, 10),
            },
        ),
        RosterEntry::student(
            3,
            "student2",
            "123456",
            "Lucía Martínez",
            StudentProfile {
                grade: "6th grade".into(),
                joined_on: day(2025, 2, 5),
            },
        ),
        RosterEntry::student(
            4,
            "student3",
            "123456",
            "Miguel Torres",
            StudentProfile {
                grade: "7th grade".into(),
                joined_on: day(2025, 2, 15),
            },
        ),
        RosterEntry::student(
            5,
            "student4",
            "123456",
            "Ana Rodríguez",
            StudentProfile {
                grade: "8th grade".into(),
                joined_on: day(2025, 3, 3),
            },
        ),
    ]
}

pub fn projects() -> Vec<Project> {
    vec![
        NewProject::new(
            "Line Following Robot",
            "Build a robot that follows a path marked on the floor.",
        )
        .with_difficulty(Difficulty::Beginner)
        .with_category(Category::Electronics)
        .with_duration("3 hours")
        .with_materials(["Arduino UNO", "IR sensors", "DC motors", "Wheels", "Battery"])
        .with_steps([
            "Assemble the base frame",
            "Connect motors and wheels",
            "Wire the IR sensors",
            "Program the Arduino",
            "Test on the track",
        ])
        .into_project(ProjectId(1), at(2025, 5, 20, 10, 0)),
        NewProject::new(
            "Robotic Arm",
            "Build a robotic arm that can pick up and move small objects.",
        )
        .with_difficulty(Difficulty::Intermediate)
        .with_category(Category::Mechanics)
        .with_duration("5 hours")
        .with_materials([
            "Servo motors",
            "Arduino MEGA",
            "3D printed parts",
            "Cables",
            "Power supply",
        ])
        .with_steps([
            "Print the 3D parts",
            "Assemble the arm frame",
            "Connect the servos",
            "Program basic movements",
            "Calibrate positions",
        ])
        .into_project(ProjectId(2), at(2025, 5, 22, 14, 30)),
        NewProject::new(
            "Autonomous Car",
            "Create a vehicle that navigates and avoids obstacles on its own.",
        )
        .with_difficulty(Difficulty::Advanced)
        .with_category(Category::Programming)
        .with_duration("8 hours")
        .with_materials([
            "Raspberry Pi",
            "Ultrasonic sensor",
            "Pi camera",
            "Car chassis",
            "Rechargeable batteries",
        ])
        .with_steps([
            "Mount the chassis and motors",
            "Set up the Raspberry Pi",
            "Install sensors and camera",
            "Program navigation algorithms",
            "Test in a controlled environment",
            "Refine the algorithms",
        ])
        .into_project(ProjectId(3), at(2025, 5, 24, 9, 15)),
    ]
}

pub fn assignments() -> Vec<Assignment> {
    vec![
        Assignment::new(
            AssignmentId(1),
            UserId(2),
            ProjectId(1),
            at(2025, 6, 1, 10, 0),
        ),
        Assignment::new(
            AssignmentId(2),
            UserId(3),
            ProjectId(2),
            at(2025, 5, 28, 14, 0),
        )
        .completed_on(at(2025, 5, 30, 16, 45)),
    ]
}
