use crate::models::{DetailResponse, RecapForm};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Recap API",
        version = "1.0.0",
        description = r#"
## Attendance Recap

Upload raw time-clock attendance exports and leave (cuti) sheets, get back a single
`rekap.xlsx` with one row per employee.

### Layout of the recap
- `No`, `NIK`, `User Name`, `Department`
- For every date between the first and last attendance date: `In`, `Out`, `Reason`
  under a `dd/mm/YYYY` + weekday header. Leave days read `Cuti`, missing punches read `-`.
- `Summary`: `Jumlah Absen` (present weekdays), `Tidak Absen` (absent weekdays),
  `Jumlah Cuti` (leave days, weekends included), `Reason Cuti`.

### Input sheets
- Attendance: `NIK`, `User Name`, `Department`, `Date`, `First-In Time`, `Last-Out Time`
- Leave: `NIK`, `Start Date`, `End Date`, `Reason Cuti`

Dates are read day-first (`05/03/2024` is 5 March).
"#,
    ),
    paths(
        crate::api::recap::create_recap
    ),
    components(
        schemas(
            DetailResponse,
            RecapForm
        )
    ),
    tags(
        (name = "Recap", description = "Attendance recap generation"),
    )
)]
pub struct ApiDoc;
